//! Configuration loading for Casefile.
//!
//! Configuration lives at `~/.casefile/config.toml`. Every section is optional;
//! accessors on [`CasefileConfig`] resolve missing values to the defaults the
//! simulated backend has always used.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_TEAM_ID: &str = "team-1";
pub const DEFAULT_TEAM_CODE: &str = "TEAM1";
pub const DEFAULT_TEAM_PASSWORD: &str = "PASSWORD1";
pub const DEFAULT_RECORD_KEY: &str = "casefile_dossier";
pub const DEFAULT_LOG_KEY: &str = "casefile_api_logs";

// Default value function for serde (bool::default() is false, so only true needs a fn)
pub(crate) const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct CasefileConfig {
    pub team: Option<TeamConfig>,
    pub storage: Option<StorageConfig>,
    pub latency: Option<LatencyConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Team identity and the fixed login credentials.
///
/// ```toml
/// [team]
/// id = "team-1"
/// code = "TEAM1"
/// password = "PASSWORD1"
/// ```
#[derive(Default, Deserialize)]
pub struct TeamConfig {
    /// Route segment used in audit log endpoints.
    pub id: Option<String>,
    pub code: Option<String>,
    pub password: Option<String>,
}

// Manual Debug impl to prevent leaking the password in logs.
impl std::fmt::Debug for TeamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamConfig")
            .field("id", &self.id)
            .field("code", &self.code)
            .field(
                "password",
                &if self.password.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .finish()
    }
}

/// Where the dossier and request log are persisted.
///
/// ```toml
/// [storage]
/// dir = "~/.casefile/data"
/// record_key = "casefile_dossier"
/// log_key = "casefile_api_logs"
/// ```
///
/// Without `dir`, state lives under `~/.casefile/data`; only when no home
/// directory is known is it kept in memory for the life of the process.
#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    pub dir: Option<String>,
    pub record_key: Option<String>,
    pub log_key: Option<String>,
}

/// Simulated network latency per operation, in milliseconds.
///
/// ```toml
/// [latency]
/// enabled = true
/// read_ms = 400
/// verdict_ms = 2000
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    /// Disable to resolve every operation immediately.
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub read_ms: Option<u64>,
    pub notes_ms: Option<u64>,
    pub evidence_ms: Option<u64>,
    pub verdict_ms: Option<u64>,
    pub session_start_ms: Option<u64>,
    pub reset_ms: Option<u64>,
    /// Delay before an unknown evidence code is reported back to the team.
    pub rejection_ms: Option<u64>,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            read_ms: None,
            notes_ms: None,
            evidence_ms: None,
            verdict_ms: None,
            session_start_ms: None,
            reset_ms: None,
            rejection_ms: None,
        }
    }
}

impl LatencyConfig {
    /// Resolve one field: zero when disabled, `default_ms` when unset.
    #[must_use]
    pub fn resolve(&self, value: Option<u64>, default_ms: u64) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        Duration::from_millis(value.unwrap_or(default_ms))
    }
}

impl CasefileConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn team_id(&self) -> &str {
        self.team
            .as_ref()
            .and_then(|team| team.id.as_deref())
            .unwrap_or(DEFAULT_TEAM_ID)
    }

    #[must_use]
    pub fn team_code(&self) -> &str {
        self.team
            .as_ref()
            .and_then(|team| team.code.as_deref())
            .unwrap_or(DEFAULT_TEAM_CODE)
    }

    #[must_use]
    pub fn team_password(&self) -> &str {
        self.team
            .as_ref()
            .and_then(|team| team.password.as_deref())
            .unwrap_or(DEFAULT_TEAM_PASSWORD)
    }

    /// Storage directory with a leading `~` expanded, if file storage is configured.
    #[must_use]
    pub fn storage_dir(&self) -> Option<PathBuf> {
        let raw = self.storage.as_ref()?.dir.as_deref()?;
        Some(expand_home(raw))
    }

    #[must_use]
    pub fn record_key(&self) -> &str {
        self.storage
            .as_ref()
            .and_then(|storage| storage.record_key.as_deref())
            .unwrap_or(DEFAULT_RECORD_KEY)
    }

    #[must_use]
    pub fn log_key(&self) -> &str {
        self.storage
            .as_ref()
            .and_then(|storage| storage.log_key.as_deref())
            .unwrap_or(DEFAULT_LOG_KEY)
    }

    #[must_use]
    pub fn latency(&self) -> LatencyConfig {
        self.latency.clone().unwrap_or_default()
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

/// Root of per-user Casefile state (`~/.casefile`).
#[must_use]
pub fn casefile_home() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".casefile"))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    casefile_home().map(|dir| dir.join("config.toml"))
}
