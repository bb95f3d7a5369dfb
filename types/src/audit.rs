//! Audit log entries and the logical endpoints they are labeled with.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EvidenceCode, Timestamp};

/// Status recorded for every simulated request; the backend never fails one.
pub const STATUS_OK: u16 = 200;

/// Request kind. Serialized with the HTTP verb of the simulated endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditMethod {
    #[serde(rename = "GET")]
    Read,
    #[serde(rename = "POST")]
    Write,
    #[serde(rename = "DELETE")]
    Delete,
}

impl AuditMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "GET",
            Self::Write => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for AuditMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical routes of the simulated backend. Used only for audit labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Dossier,
    Notes,
    Evidence(EvidenceCode),
    Verdict,
    SessionStart,
    Reset,
}

impl Endpoint {
    #[must_use]
    pub fn method(&self) -> AuditMethod {
        match self {
            Self::Dossier => AuditMethod::Read,
            Self::Notes | Self::Evidence(_) | Self::Verdict | Self::SessionStart => {
                AuditMethod::Write
            }
            Self::Reset => AuditMethod::Delete,
        }
    }

    /// Full route for `team`, e.g. `/v1/team-1/evidence/PHY-09`.
    #[must_use]
    pub fn path(&self, team: &str) -> String {
        match self {
            Self::Dossier => format!("/v1/{team}/dossier"),
            Self::Notes => format!("/v1/{team}/notes"),
            Self::Evidence(code) => format!("/v1/{team}/evidence/{code}"),
            Self::Verdict => format!("/v1/{team}/verdict"),
            Self::SessionStart => format!("/v1/{team}/session/start"),
            Self::Reset => format!("/v1/{team}/reset"),
        }
    }
}

/// One line of the request log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub timestamp: Timestamp,
    pub method: AuditMethod,
    pub endpoint: String,
    pub status: u16,
}

impl AuditLogEntry {
    /// A successful request against `endpoint` for `team`.
    #[must_use]
    pub fn ok(endpoint: &Endpoint, team: &str, timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            method: endpoint.method(),
            endpoint: endpoint.path(team),
            status: STATUS_OK,
        }
    }
}

impl fmt::Display for AuditLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} ({})",
            self.timestamp.format("%H:%M:%S"),
            self.method,
            self.endpoint,
            self.status
        )
    }
}
