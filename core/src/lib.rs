//! Core session logic for Casefile.
//!
//! The public surface is the [`SessionService`] port. [`LocalSessionService`]
//! is the adapter that simulates a remote backend over local storage, with
//! per-operation latency and an audit trail. Callers sit on top:
//!
//! ```text
//! InvestigationDesk ──┐
//!                     ├── Arc<dyn SessionService> ── LocalSessionService
//! OperationsConsole ──┘                                ├── RecordStore
//!                                                      └── AuditLog ── ChangeBus
//! ```

mod autosave;
mod console;
mod desk;
mod latency;
mod local;
mod service;

pub use autosave::NotesAutosave;
pub use console::{ConsoleSnapshot, OperationsConsole};
pub use desk::{DeskError, EvidenceCheck, InvestigationDesk, TeamCredentials};
pub use latency::LatencyProfile;
pub use local::{LocalSessionBuilder, LocalSessionService};
pub use service::{SessionError, SessionFut, SessionService};
