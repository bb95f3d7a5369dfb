use std::future::Future;
use std::pin::Pin;

use casefile_store::StoreError;
use casefile_types::{EvidenceCodeError, InvestigationRecord, Timestamp, VerdictPayload};
use thiserror::Error;

/// Session operation future type alias.
pub type SessionFut<'a, T> = Pin<Box<dyn Future<Output = Result<T, SessionError>> + Send + 'a>>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid evidence code: {0}")]
    InvalidEvidenceCode(#[from] EvidenceCodeError),
}

/// The case-management backend as seen by its callers.
///
/// Every operation resolves to `true` on success; failures are errors, never
/// a `false` in place of one. Operations are not cancellable and are not
/// guaranteed to complete in invocation order.
pub trait SessionService: Send + Sync {
    /// The full record, defaults included if nothing was ever written.
    fn get_state(&self) -> SessionFut<'_, InvestigationRecord>;

    /// Anchor the session clock. Ignored if already anchored.
    fn start_timer(&self, start: Timestamp) -> SessionFut<'_, bool>;

    /// Replace the notes wholesale.
    fn update_notes(&self, notes: String) -> SessionFut<'_, bool>;

    /// Mark a code verified. Succeeds whether or not it already was.
    ///
    /// Matching against the evidence catalog is the caller's job.
    fn verify_evidence(&self, code: String) -> SessionFut<'_, bool>;

    /// Store the verdict, overwriting any earlier one.
    ///
    /// Refusing a second submission is the caller's job.
    fn submit_verdict(&self, verdict: VerdictPayload) -> SessionFut<'_, bool>;

    /// Clear the record and the audit log.
    fn reset(&self) -> SessionFut<'_, bool>;
}
