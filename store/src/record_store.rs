use std::sync::Arc;

use casefile_types::InvestigationRecord;
use chrono::Utc;

use crate::{KeyValueStorage, StoreError};

/// Owns the persisted [`InvestigationRecord`] blob.
///
/// No partial-field updates at this layer: callers load, mutate, and save the
/// whole record.
#[derive(Clone)]
pub struct RecordStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl RecordStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The persisted record, or a fresh default one if nothing is stored.
    pub fn load(&self) -> Result<InvestigationRecord, StoreError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(InvestigationRecord::new(Utc::now()));
        };
        serde_json::from_str(&raw).map_err(|source| {
            tracing::warn!(key = %self.key, "Stored investigation record is corrupt: {source}");
            StoreError::Corrupt {
                key: self.key.clone(),
                source,
            }
        })
    }

    /// Overwrite the persisted record, stamping `last_synced_at` first.
    pub fn save(&self, record: &mut InvestigationRecord) -> Result<(), StoreError> {
        record.touch(Utc::now());
        let raw = serde_json::to_string(record).map_err(|source| StoreError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.storage.set(&self.key, &raw)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(&self.key)
    }
}
