//! Operations console observing a team's activity.

use std::sync::Arc;

use casefile_core::{OperationsConsole, SessionService};
use casefile_store::{AUDIT_LOG_CAPACITY, ChangeBus, MemoryStorage, Topic};
use casefile_types::AuditMethod;

use crate::common::{TEAM_CODE, TEAM_PASSWORD, at, desk_for, instant_service, service_on};

#[tokio::test]
async fn console_sees_desk_activity_as_it_happens() {
    let service = instant_service();
    let console = OperationsConsole::from_local(service.clone());
    let desk = desk_for(&service);
    let mut watch = console.watch();

    desk.login(TEAM_CODE, TEAM_PASSWORD, at(0)).await.unwrap();
    // Timer anchor and the read that confirms it.
    assert!(watch.changed().await);
    assert!(watch.try_changed());

    desk.verify_code("not-a-code").await.unwrap();
    assert!(!watch.try_changed(), "rejected codes never reach the backend");

    desk.verify_code("cctv-21").await.unwrap();
    assert!(watch.try_changed());

    let snapshot = console.snapshot().await.unwrap();
    let endpoints: Vec<&str> = snapshot.logs.iter().map(|e| e.endpoint.as_str()).collect();
    assert_eq!(
        endpoints,
        [
            "/v1/team-1/dossier",
            "/v1/team-1/evidence/CCTV-21",
            "/v1/team-1/dossier",
            "/v1/team-1/session/start",
        ]
    );
}

#[tokio::test]
async fn services_sharing_a_bus_and_storage_see_each_other() {
    let storage = Arc::new(MemoryStorage::new());
    let bus = ChangeBus::new();
    let team = service_on(storage.clone(), bus.clone());
    let admin = service_on(storage, bus.clone());
    let console = OperationsConsole::from_local(admin);
    let mut records = bus.listen(Topic::Record);

    team.update_notes("seen from the other side".to_string())
        .await
        .unwrap();
    assert!(records.changed().await);

    let snapshot = console.snapshot().await.unwrap();
    assert_eq!(snapshot.record.notes(), "seen from the other side");
    assert_eq!(snapshot.logs.len(), 2);
}

#[tokio::test]
async fn wipe_reports_pristine_state_and_wakes_watchers() {
    let service = instant_service();
    let console = OperationsConsole::from_local(service.clone());
    for i in 0..(AUDIT_LOG_CAPACITY + 5) {
        service.update_notes(format!("draft {i}")).await.unwrap();
    }
    assert_eq!(service.audit_log().list().unwrap().len(), AUDIT_LOG_CAPACITY);

    let mut records = service.bus().listen(Topic::Record);
    let after = console.wipe().await.unwrap();
    assert!(records.try_changed());
    assert!(after.record.is_pristine());
    assert_eq!(after.logs.len(), 2);
    assert_eq!(after.logs[1].method, AuditMethod::Delete);

    let rendered = after.render();
    assert!(rendered.contains("DELETE /v1/team-1/reset (200)"));
    assert!(!rendered.contains("draft"));
}

#[tokio::test]
async fn dropped_watch_stops_listening() {
    let service = instant_service();
    let console = OperationsConsole::from_local(service.clone());
    let watch = console.watch();
    assert_eq!(service.bus().listener_count(Topic::AuditLog), 1);
    drop(watch);
    service.get_state().await.unwrap();
    assert_eq!(service.bus().listener_count(Topic::AuditLog), 0);
}
