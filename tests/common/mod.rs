//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use casefile_core::{InvestigationDesk, LatencyProfile, LocalSessionService, TeamCredentials};
use casefile_store::{ChangeBus, FileStorage, KeyValueStorage, MemoryStorage};
use casefile_types::{Timestamp, VerdictDraft};
use chrono::{TimeZone, Utc};

pub const TEAM_CODE: &str = "TEAM1";
pub const TEAM_PASSWORD: &str = "PASSWORD1";

/// Whole seconds since the epoch as a timestamp.
pub fn at(secs: i64) -> Timestamp {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// In-memory service with no simulated latency and a private bus.
pub fn instant_service() -> Arc<LocalSessionService> {
    service_on(Arc::new(MemoryStorage::new()), ChangeBus::new())
}

pub fn service_on(storage: Arc<dyn KeyValueStorage>, bus: ChangeBus) -> Arc<LocalSessionService> {
    Arc::new(
        LocalSessionService::builder()
            .storage(storage)
            .bus(bus)
            .latency(LatencyProfile::instant())
            .build(),
    )
}

/// File-backed service rooted at `dir`.
pub fn file_service(dir: &Path) -> Arc<LocalSessionService> {
    let storage = FileStorage::open(dir).unwrap();
    service_on(Arc::new(storage), ChangeBus::new())
}

pub fn desk_for(service: &Arc<LocalSessionService>) -> InvestigationDesk {
    InvestigationDesk::new(
        service.clone(),
        TeamCredentials::new(TEAM_CODE, TEAM_PASSWORD),
        Duration::ZERO,
    )
}

pub fn complete_draft(culprit: &str) -> VerdictDraft {
    VerdictDraft {
        culprit: culprit.to_string(),
        motive: "Debts to the estate".to_string(),
        method: "Laudanum in the tea".to_string(),
        evidence: "FOR-33, WIT-07".to_string(),
    }
}
