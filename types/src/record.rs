use serde::{Deserialize, Serialize};

use crate::{EvidenceCode, Timestamp, VerdictPayload};

/// The single persisted investigation record for a team.
///
/// Fields are private so the write-once and grow-only rules are applied in
/// one place. The serialized form uses camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationRecord {
    notes: String,
    verdict: Option<VerdictPayload>,
    session_start: Option<Timestamp>,
    verified_evidence_codes: Vec<EvidenceCode>,
    last_synced_at: Timestamp,
}

impl InvestigationRecord {
    /// A fresh record with every field at its default.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            notes: String::new(),
            verdict: None,
            session_start: None,
            verified_evidence_codes: Vec::new(),
            last_synced_at: now,
        }
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Last write wins.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    #[must_use]
    pub fn verdict(&self) -> Option<&VerdictPayload> {
        self.verdict.as_ref()
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.verdict.is_some()
    }

    /// Store a verdict, replacing any previous one.
    ///
    /// The record does not refuse a second verdict; sealing is enforced by
    /// whoever submits it.
    pub fn set_verdict(&mut self, verdict: VerdictPayload) {
        self.verdict = Some(verdict);
    }

    #[must_use]
    pub fn session_start(&self) -> Option<Timestamp> {
        self.session_start
    }

    /// Set the session anchor if it is not already set.
    ///
    /// Returns `true` when the anchor was written.
    pub fn anchor_session(&mut self, start: Timestamp) -> bool {
        if self.session_start.is_some() {
            return false;
        }
        self.session_start = Some(start);
        true
    }

    #[must_use]
    pub fn verified_codes(&self) -> &[EvidenceCode] {
        &self.verified_evidence_codes
    }

    #[must_use]
    pub fn has_verified(&self, code: &EvidenceCode) -> bool {
        self.verified_evidence_codes.contains(code)
    }

    /// Add a code to the verified set.
    ///
    /// Returns `false` if the code was already present.
    pub fn record_evidence(&mut self, code: EvidenceCode) -> bool {
        if self.has_verified(&code) {
            return false;
        }
        self.verified_evidence_codes.push(code);
        true
    }

    #[must_use]
    pub fn last_synced_at(&self) -> Timestamp {
        self.last_synced_at
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.last_synced_at = now;
    }

    /// True when nothing but the sync stamp differs from a fresh record.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.notes.is_empty()
            && self.verdict.is_none()
            && self.session_start.is_none()
            && self.verified_evidence_codes.is_empty()
    }
}
