//! Persistence for the simulated case-management backend.
//!
//! Two independently keyed JSON blobs live in a [`KeyValueStorage`]:
//!
//! ```text
//! KeyValueStorage (MemoryStorage | FileStorage)
//! ├── RecordStore: the team's InvestigationRecord
//! └── AuditLog: capped, most-recent-first request log
//!                 └── ChangeBus: wakes observers on every append
//! ```

mod audit_log;
mod error;
mod file_storage;
mod notify;
mod record_store;
mod storage;

pub use audit_log::{AUDIT_LOG_CAPACITY, AuditLog, PendingAppend};
pub use error::StoreError;
pub use file_storage::FileStorage;
pub use notify::{ChangeBus, Listener, SubscriptionId, Topic};
pub use record_store::RecordStore;
pub use storage::{KeyValueStorage, MemoryStorage};
