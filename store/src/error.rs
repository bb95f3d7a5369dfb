use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage key '{key}' is not a valid blob name")]
    InvalidKey { key: String },
    #[error("storage IO failed for '{key}': {source}")]
    Io { key: String, source: io::Error },
    /// The persisted blob exists but does not parse. Never coerced to defaults.
    #[error("stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },
    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl StoreError {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::InvalidKey { key }
            | Self::Io { key, .. }
            | Self::Corrupt { key, .. }
            | Self::Encode { key, .. } => key,
        }
    }

    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}
