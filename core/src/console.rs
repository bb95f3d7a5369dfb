use std::fmt::Write as _;
use std::sync::Arc;

use casefile_store::{AuditLog, Listener, Topic};
use casefile_types::{AuditLogEntry, InvestigationRecord};

use crate::{LocalSessionService, SessionError, SessionService};

/// Everything the operations console shows at one instant.
#[derive(Debug, Clone)]
pub struct ConsoleSnapshot {
    pub record: InvestigationRecord,
    pub logs: Vec<AuditLogEntry>,
}

impl ConsoleSnapshot {
    /// Plain-text rendering: the dossier as pretty JSON, then the request log.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("== Dossier ==\n");
        match serde_json::to_string_pretty(&self.record) {
            Ok(json) => out.push_str(&json),
            Err(err) => {
                let _ = write!(out, "<unrenderable dossier: {err}>");
            }
        }
        out.push_str("\n\n== Network Activity ==\n");
        if self.logs.is_empty() {
            out.push_str("No network activity detected...\n");
        }
        for entry in &self.logs {
            let _ = writeln!(out, "{entry}");
        }
        out
    }
}

/// Read-mostly view over the backend for operators.
pub struct OperationsConsole {
    service: Arc<dyn SessionService>,
    audit: AuditLog,
}

impl OperationsConsole {
    pub fn new(service: Arc<dyn SessionService>, audit: AuditLog) -> Self {
        Self { service, audit }
    }

    pub fn from_local(service: Arc<LocalSessionService>) -> Self {
        let audit = service.audit_log().clone();
        Self::new(service, audit)
    }

    /// Fetch the record through the service, then read the log directly.
    ///
    /// The fetch itself is logged, so the returned log includes it.
    pub async fn snapshot(&self) -> Result<ConsoleSnapshot, SessionError> {
        let record = self.service.get_state().await?;
        let logs = self.audit.list()?;
        Ok(ConsoleSnapshot { record, logs })
    }

    /// Wake-ups whenever a request is logged.
    #[must_use]
    pub fn watch(&self) -> Listener {
        self.audit.bus().listen(Topic::AuditLog)
    }

    /// Reset the investigation and return the state that follows.
    pub async fn wipe(&self) -> Result<ConsoleSnapshot, SessionError> {
        self.service.reset().await?;
        tracing::info!("Console wipe complete");
        self.snapshot().await
    }
}
