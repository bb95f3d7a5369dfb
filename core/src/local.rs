//! Local-storage adapter for [`SessionService`].
//!
//! Each operation waits out its simulated latency first, then runs
//! load → mutate → save → audit → notify without yielding. That tail runs
//! under a commit lock, so concurrent callers on a multi-threaded runtime
//! still never observe a half-applied mutation.

use std::sync::{Arc, Mutex, PoisonError};

use casefile_config::{CasefileConfig, DEFAULT_LOG_KEY, DEFAULT_RECORD_KEY, DEFAULT_TEAM_ID};
use casefile_store::{
    AuditLog, ChangeBus, FileStorage, KeyValueStorage, MemoryStorage, RecordStore, Topic,
};
use casefile_types::{
    AuditLogEntry, Endpoint, EvidenceCode, InvestigationRecord, Timestamp, VerdictPayload,
};
use chrono::Utc;
use tracing::{debug, info};

use crate::latency::simulate;
use crate::{LatencyProfile, SessionError, SessionFut, SessionService};

pub struct LocalSessionService {
    records: RecordStore,
    audit: AuditLog,
    latency: LatencyProfile,
    team: String,
    commit: Mutex<()>,
}

impl std::fmt::Debug for LocalSessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSessionService")
            .field("team", &self.team)
            .field("record_key", &self.records.key())
            .field("log_key", &self.audit.key())
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl LocalSessionService {
    #[must_use]
    pub fn builder() -> LocalSessionBuilder {
        LocalSessionBuilder::default()
    }

    /// Build the process-wide service from configuration.
    ///
    /// Uses file storage under `[storage] dir`, falling back to
    /// `~/.casefile/data`, and in-memory storage only when no home directory
    /// is known. Notifications go through [`ChangeBus::global`].
    pub fn open(config: &CasefileConfig) -> Result<Self, SessionError> {
        let dir = config
            .storage_dir()
            .or_else(|| casefile_config::casefile_home().map(|home| home.join("data")));
        let storage: Arc<dyn KeyValueStorage> = match dir {
            Some(dir) => {
                let files = FileStorage::open(dir)?;
                info!(dir = %files.dir().display(), "Opened file storage");
                Arc::new(files)
            }
            None => {
                info!("No storage directory available; using in-memory storage");
                Arc::new(MemoryStorage::new())
            }
        };

        Ok(Self::builder()
            .storage(storage)
            .bus(ChangeBus::global().clone())
            .latency(LatencyProfile::from_config(&config.latency()))
            .team(config.team_id())
            .record_key(config.record_key())
            .log_key(config.log_key())
            .build())
    }

    #[must_use]
    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    #[must_use]
    pub fn record_store(&self) -> &RecordStore {
        &self.records
    }

    #[must_use]
    pub fn bus(&self) -> &ChangeBus {
        self.audit.bus()
    }

    #[must_use]
    pub fn team(&self) -> &str {
        &self.team
    }

    #[must_use]
    pub fn latency(&self) -> LatencyProfile {
        self.latency
    }

    fn commit<T>(
        &self,
        apply: impl FnOnce() -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let _guard = self.commit.lock().unwrap_or_else(PoisonError::into_inner);
        apply()
    }

    fn entry(&self, endpoint: &Endpoint) -> AuditLogEntry {
        let entry = AuditLogEntry::ok(endpoint, &self.team, Utc::now());
        debug!(method = %entry.method, endpoint = %entry.endpoint, "Request served");
        entry
    }

    fn log(&self, endpoint: &Endpoint) -> Result<(), SessionError> {
        self.audit.append(self.entry(endpoint))?;
        Ok(())
    }

    /// Persist `record` and log `endpoint`, or neither.
    ///
    /// The log entry is staged first, so an unreadable log fails the call
    /// before the record is written.
    fn save_and_log(
        &self,
        record: &mut InvestigationRecord,
        endpoint: &Endpoint,
    ) -> Result<(), SessionError> {
        let pending = self.audit.prepare(self.entry(endpoint))?;
        self.records.save(record)?;
        pending.commit()?;
        self.bus().notify(Topic::Record);
        Ok(())
    }
}

impl SessionService for LocalSessionService {
    fn get_state(&self) -> SessionFut<'_, InvestigationRecord> {
        Box::pin(async move {
            let endpoint = Endpoint::Dossier;
            simulate(self.latency.for_endpoint(&endpoint)).await;
            self.commit(|| {
                let record = self.records.load()?;
                self.log(&endpoint)?;
                Ok(record)
            })
        })
    }

    fn start_timer(&self, start: Timestamp) -> SessionFut<'_, bool> {
        Box::pin(async move {
            let endpoint = Endpoint::SessionStart;
            simulate(self.latency.for_endpoint(&endpoint)).await;
            self.commit(|| {
                let mut record = self.records.load()?;
                if !record.anchor_session(start) {
                    debug!("Session clock already anchored");
                    return Ok(true);
                }
                self.save_and_log(&mut record, &endpoint)?;
                info!(start = %start, "Session clock anchored");
                Ok(true)
            })
        })
    }

    fn update_notes(&self, notes: String) -> SessionFut<'_, bool> {
        Box::pin(async move {
            let endpoint = Endpoint::Notes;
            simulate(self.latency.for_endpoint(&endpoint)).await;
            self.commit(|| {
                let mut record = self.records.load()?;
                debug!(bytes = notes.len(), "Updating notes");
                record.set_notes(notes);
                self.save_and_log(&mut record, &endpoint)?;
                Ok(true)
            })
        })
    }

    fn verify_evidence(&self, code: String) -> SessionFut<'_, bool> {
        Box::pin(async move {
            let code = EvidenceCode::new(&code)?;
            let endpoint = Endpoint::Evidence(code.clone());
            simulate(self.latency.for_endpoint(&endpoint)).await;
            self.commit(|| {
                let mut record = self.records.load()?;
                if !record.record_evidence(code.clone()) {
                    debug!(code = %code, "Evidence already verified");
                    return Ok(true);
                }
                debug!(code = %code, "Evidence verified");
                self.save_and_log(&mut record, &endpoint)?;
                Ok(true)
            })
        })
    }

    fn submit_verdict(&self, verdict: VerdictPayload) -> SessionFut<'_, bool> {
        Box::pin(async move {
            let endpoint = Endpoint::Verdict;
            simulate(self.latency.for_endpoint(&endpoint)).await;
            self.commit(|| {
                let mut record = self.records.load()?;
                if record.is_sealed() {
                    debug!("Overwriting a previously submitted verdict");
                }
                record.set_verdict(verdict);
                self.save_and_log(&mut record, &endpoint)?;
                Ok(true)
            })
        })
    }

    fn reset(&self) -> SessionFut<'_, bool> {
        Box::pin(async move {
            let endpoint = Endpoint::Reset;
            simulate(self.latency.for_endpoint(&endpoint)).await;
            self.commit(|| {
                self.records.clear()?;
                self.audit.clear()?;
                // Logged after clearing, so the wipe itself is the first entry.
                self.log(&endpoint)?;
                self.bus().notify(Topic::Record);
                info!(team = %self.team, "Investigation records wiped");
                Ok(true)
            })
        })
    }
}

/// Assembles a [`LocalSessionService`]; defaults to in-memory storage, a
/// private [`ChangeBus`], and the standard latency profile.
pub struct LocalSessionBuilder {
    storage: Option<Arc<dyn KeyValueStorage>>,
    bus: Option<ChangeBus>,
    latency: LatencyProfile,
    team: String,
    record_key: String,
    log_key: String,
}

impl Default for LocalSessionBuilder {
    fn default() -> Self {
        Self {
            storage: None,
            bus: None,
            latency: LatencyProfile::default(),
            team: DEFAULT_TEAM_ID.to_string(),
            record_key: DEFAULT_RECORD_KEY.to_string(),
            log_key: DEFAULT_LOG_KEY.to_string(),
        }
    }
}

impl LocalSessionBuilder {
    pub fn storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn bus(mut self, bus: ChangeBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    pub fn record_key(mut self, key: impl Into<String>) -> Self {
        self.record_key = key.into();
        self
    }

    pub fn log_key(mut self, key: impl Into<String>) -> Self {
        self.log_key = key.into();
        self
    }

    #[must_use]
    pub fn build(self) -> LocalSessionService {
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));
        let bus = self.bus.unwrap_or_default();
        LocalSessionService {
            records: RecordStore::new(Arc::clone(&storage), self.record_key),
            audit: AuditLog::new(storage, self.log_key, bus),
            latency: self.latency,
            team: self.team,
            commit: Mutex::new(()),
        }
    }
}
