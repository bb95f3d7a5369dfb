//! Core domain types for Casefile.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod audit;
mod elapsed;
mod evidence;
mod record;
mod verdict;

pub use audit::{AuditLogEntry, AuditMethod, Endpoint, STATUS_OK};
pub use elapsed::{elapsed_since, format_clock, format_duration};
pub use evidence::{
    CatalogEntry, EVIDENCE_CATALOG, EvidenceCode, EvidenceCodeError, UNCLASSIFIED_TITLE,
    catalog_title, lookup_evidence,
};
pub use record::InvestigationRecord;
pub use verdict::{IncompleteVerdict, VerdictDraft, VerdictPayload};

/// Wall-clock instant used for every persisted time value.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
