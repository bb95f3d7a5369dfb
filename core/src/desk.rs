//! Caller-side rules for an investigation team.
//!
//! The backend accepts anything; the desk is where credentials are checked,
//! evidence codes are matched against the catalog, and a verdict is sealed
//! after its first submission.

use std::sync::Arc;
use std::time::Duration;

use casefile_config::CasefileConfig;
use casefile_types::{
    CatalogEntry, EvidenceCode, IncompleteVerdict, Timestamp, VerdictDraft, VerdictPayload,
    catalog_title, elapsed_since, lookup_evidence,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::latency::simulate;
use crate::{NotesAutosave, SessionError, SessionService};

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("access denied: invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    IncompleteVerdict(#[from] IncompleteVerdict),
    #[error("verdict already submitted; the dossier is sealed")]
    VerdictSealed,
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// The single team login this deployment accepts.
#[derive(Clone)]
pub struct TeamCredentials {
    code: String,
    password: String,
}

impl std::fmt::Debug for TeamCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamCredentials")
            .field("code", &self.code)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl TeamCredentials {
    pub fn new(code: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &CasefileConfig) -> Self {
        Self::new(config.team_code(), config.team_password())
    }

    /// Team code is case-insensitive; the password is not.
    #[must_use]
    pub fn check(&self, code: &str, password: &str) -> bool {
        code.to_uppercase() == self.code.to_uppercase() && password == self.password
    }
}

/// Outcome of checking a code typed at the evidence terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvidenceCheck {
    /// Known code; recorded as verified.
    Confirmed(&'static CatalogEntry),
    /// Not in the catalog; nothing was recorded.
    Rejected { code: EvidenceCode },
    /// Nothing but whitespace was entered.
    Blank,
}

pub struct InvestigationDesk {
    service: Arc<dyn SessionService>,
    credentials: TeamCredentials,
    rejection_delay: Duration,
    autosave_quiet: Duration,
}

impl InvestigationDesk {
    pub fn new(
        service: Arc<dyn SessionService>,
        credentials: TeamCredentials,
        rejection_delay: Duration,
    ) -> Self {
        Self {
            service,
            credentials,
            rejection_delay,
            autosave_quiet: NotesAutosave::DEFAULT_QUIET,
        }
    }

    /// Idle time the notes editor waits before auto-saving.
    pub fn with_autosave_quiet(mut self, quiet: Duration) -> Self {
        self.autosave_quiet = quiet;
        self
    }

    /// Check credentials and anchor the session clock.
    ///
    /// Returns the effective session start, which is `now` only for the first
    /// login of a session.
    pub async fn login(
        &self,
        code: &str,
        password: &str,
        now: Timestamp,
    ) -> Result<Timestamp, DeskError> {
        if !self.credentials.check(code, password) {
            warn!(code, "Rejected login");
            return Err(DeskError::InvalidCredentials);
        }
        self.service.start_timer(now).await?;
        let record = self.service.get_state().await?;
        let start = record.session_start().unwrap_or(now);
        info!(start = %start, "Team logged in");
        Ok(start)
    }

    pub async fn verify_code(&self, raw: &str) -> Result<EvidenceCheck, DeskError> {
        let Ok(code) = EvidenceCode::new(raw) else {
            return Ok(EvidenceCheck::Blank);
        };
        match lookup_evidence(&code) {
            Some(entry) => {
                self.service.verify_evidence(code.into_inner()).await?;
                info!(code = entry.code, "Evidence confirmed");
                Ok(EvidenceCheck::Confirmed(entry))
            }
            None => {
                simulate(self.rejection_delay).await;
                debug!(code = %code, "Unknown evidence code");
                Ok(EvidenceCheck::Rejected { code })
            }
        }
    }

    /// Start a debounced auto-save for the notes editor.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn autosave(&self) -> NotesAutosave {
        NotesAutosave::spawn(Arc::clone(&self.service), self.autosave_quiet)
    }

    /// Save the notes buffer now. Empty text is never synced.
    ///
    /// Returns whether a write was issued.
    pub async fn save_notes(&self, text: &str) -> Result<bool, DeskError> {
        if text.is_empty() {
            return Ok(false);
        }
        self.service.update_notes(text.to_string()).await?;
        Ok(true)
    }

    /// Submit the team's verdict once.
    ///
    /// Field checks come before the sealed check, so an incomplete draft is
    /// reported as such even after a verdict exists.
    pub async fn submit_verdict(
        &self,
        draft: VerdictDraft,
        now: Timestamp,
    ) -> Result<VerdictPayload, DeskError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(IncompleteVerdict { missing }.into());
        }

        let record = self.service.get_state().await?;
        if record.is_sealed() {
            return Err(DeskError::VerdictSealed);
        }
        let elapsed = record
            .session_start()
            .map_or(Duration::ZERO, |start| elapsed_since(start, now));

        let payload = draft.seal(now, elapsed)?;
        self.service.submit_verdict(payload.clone()).await?;
        info!(
            culprit = %payload.culprit,
            elapsed_secs = elapsed.as_secs(),
            "Verdict submitted"
        );
        Ok(payload)
    }

    /// Time since the session clock was anchored, if it has been.
    pub async fn elapsed(&self, now: Timestamp) -> Result<Option<Duration>, DeskError> {
        let record = self.service.get_state().await?;
        Ok(record
            .session_start()
            .map(|start| elapsed_since(start, now)))
    }

    /// Verified codes with their catalog titles, most recent first.
    pub async fn intelligence_feed(&self) -> Result<Vec<(EvidenceCode, &'static str)>, DeskError> {
        let record = self.service.get_state().await?;
        Ok(record
            .verified_codes()
            .iter()
            .rev()
            .map(|code| (code.clone(), catalog_title(code)))
            .collect())
    }
}
