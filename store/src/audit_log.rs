use std::sync::Arc;

use casefile_types::AuditLogEntry;

use crate::{ChangeBus, KeyValueStorage, StoreError, Topic};

/// Maximum number of retained entries; older ones are evicted on append.
pub const AUDIT_LOG_CAPACITY: usize = 50;

/// Append-only, capped request log, newest entry first.
#[derive(Clone)]
pub struct AuditLog {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    bus: ChangeBus,
}

impl AuditLog {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>, bus: ChangeBus) -> Self {
        Self {
            storage,
            key: key.into(),
            bus,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Insert at the head, evict beyond capacity, persist, then notify
    /// [`Topic::AuditLog`].
    pub fn append(&self, entry: AuditLogEntry) -> Result<(), StoreError> {
        self.prepare(entry)?.commit()
    }

    /// Build the next log blob without writing it.
    ///
    /// Fails with the same errors as [`AuditLog::append`], so a caller can
    /// check the log before touching anything else and write it last.
    pub fn prepare(&self, entry: AuditLogEntry) -> Result<PendingAppend<'_>, StoreError> {
        let mut entries = self.list()?;
        entries.insert(0, entry);
        entries.truncate(AUDIT_LOG_CAPACITY);

        let raw = serde_json::to_string(&entries).map_err(|source| StoreError::Encode {
            key: self.key.clone(),
            source,
        })?;
        Ok(PendingAppend { log: self, raw })
    }

    /// Most-recent-first; empty if nothing is persisted.
    pub fn list(&self) -> Result<Vec<AuditLogEntry>, StoreError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: self.key.clone(),
            source,
        })
    }

    /// Drop every entry. Does not notify.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(&self.key)
    }
}

/// An encoded append that has not been persisted yet. Dropping it discards
/// the entry.
#[must_use = "nothing is written until `commit` is called"]
pub struct PendingAppend<'a> {
    log: &'a AuditLog,
    raw: String,
}

impl PendingAppend<'_> {
    pub fn commit(self) -> Result<(), StoreError> {
        self.log.storage.set(&self.log.key, &self.raw)?;
        self.log.bus.notify(Topic::AuditLog);
        Ok(())
    }
}
