//! File-backed state surviving process restarts.

use std::fs;

use casefile_core::{SessionError, SessionService};
use casefile_types::AuditMethod;
use tempfile::tempdir;

use crate::common::{TEAM_CODE, TEAM_PASSWORD, at, complete_draft, desk_for, file_service};

#[tokio::test]
async fn state_survives_reopen() {
    let dir = tempdir().unwrap();
    {
        let service = file_service(dir.path());
        let desk = desk_for(&service);
        desk.login(TEAM_CODE, TEAM_PASSWORD, at(1_000)).await.unwrap();
        desk.verify_code("dig-14").await.unwrap();
        desk.save_notes("Study window was forced.").await.unwrap();
    }

    let service = file_service(dir.path());
    let record = service.get_state().await.unwrap();
    assert_eq!(record.notes(), "Study window was forced.");
    assert_eq!(record.session_start(), Some(at(1_000)));
    assert_eq!(record.verified_codes()[0].as_str(), "DIG-14");

    // A later login on the reopened store keeps the first anchor.
    let desk = desk_for(&service);
    let start = desk.login(TEAM_CODE, TEAM_PASSWORD, at(9_000)).await.unwrap();
    assert_eq!(start, at(1_000));

    let logs = service.audit_log().list().unwrap();
    assert!(logs.iter().any(|e| e.endpoint.ends_with("evidence/DIG-14")));
}

#[tokio::test]
async fn sealed_verdict_survives_reopen() {
    let dir = tempdir().unwrap();
    {
        let service = file_service(dir.path());
        let desk = desk_for(&service);
        desk.submit_verdict(complete_draft("The Gardener"), at(50))
            .await
            .unwrap();
    }

    let service = file_service(dir.path());
    let desk = desk_for(&service);
    assert!(
        desk.submit_verdict(complete_draft("The Butler"), at(60))
            .await
            .is_err()
    );
    let record = service.get_state().await.unwrap();
    assert_eq!(record.verdict().unwrap().culprit, "The Gardener");
}

#[tokio::test]
async fn blobs_are_camel_case_json_under_their_keys() {
    let dir = tempdir().unwrap();
    let service = file_service(dir.path());
    service.verify_evidence("for-33".to_string()).await.unwrap();

    let raw = fs::read_to_string(dir.path().join("casefile_dossier.json")).unwrap();
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(record["verifiedEvidenceCodes"][0], "FOR-33");
    assert_eq!(record["notes"], "");
    assert!(record["verdict"].is_null());
    assert!(record["lastSyncedAt"].is_string());

    let raw = fs::read_to_string(dir.path().join("casefile_api_logs.json")).unwrap();
    let logs: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(logs[0]["method"], "POST");
    assert_eq!(logs[0]["endpoint"], "/v1/team-1/evidence/FOR-33");
}

#[tokio::test]
async fn reset_removes_persisted_record() {
    let dir = tempdir().unwrap();
    let service = file_service(dir.path());
    service.update_notes("temp".to_string()).await.unwrap();
    assert!(dir.path().join("casefile_dossier.json").exists());

    service.reset().await.unwrap();
    assert!(!dir.path().join("casefile_dossier.json").exists());

    let logs = service.audit_log().list().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].method, AuditMethod::Delete);
}

#[tokio::test]
async fn corrupt_record_on_disk_is_reported_and_kept() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("casefile_dossier.json");
    fs::write(&path, "{\"notes\": \"half-writ").unwrap();

    let service = file_service(dir.path());
    let err = service.get_state().await.unwrap_err();
    assert!(matches!(err, SessionError::Store(ref e) if e.is_corrupt()));
    assert!(service.update_notes("x".to_string()).await.is_err());

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\"notes\": \"half-writ"
    );
}
