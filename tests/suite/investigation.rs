//! End-to-end investigation flows through the desk and the session service.

use std::sync::Arc;
use std::time::Duration;

use casefile_core::{
    DeskError, EvidenceCheck, LatencyProfile, LocalSessionService, SessionService,
};
use casefile_types::{AuditMethod, format_duration};

use crate::common::{TEAM_CODE, TEAM_PASSWORD, at, complete_draft, desk_for, instant_service};

#[tokio::test]
async fn full_investigation_then_reset() {
    let service = instant_service();
    let desk = desk_for(&service);

    let start = desk.login("team1", TEAM_PASSWORD, at(10_000)).await.unwrap();
    assert_eq!(start, at(10_000));

    for raw in ["phy-09", "DIG-14", "bogus", "Sus-56 "] {
        desk.verify_code(raw).await.unwrap();
    }
    desk.save_notes("Butler had a key to the study.").await.unwrap();

    let payload = desk
        .submit_verdict(complete_draft("The Butler"), at(10_000 + 5_025))
        .await
        .unwrap();
    assert_eq!(format_duration(payload.elapsed_at_submission), "1h 23m 45s");

    let record = service.get_state().await.unwrap();
    let codes: Vec<&str> = record.verified_codes().iter().map(|c| c.as_str()).collect();
    assert_eq!(codes, ["PHY-09", "DIG-14", "SUS-56"]);
    assert_eq!(record.notes(), "Butler had a key to the study.");
    assert_eq!(record.verdict(), Some(&payload));
    assert_eq!(record.session_start(), Some(at(10_000)));

    service.reset().await.unwrap();
    let record = service.get_state().await.unwrap();
    assert!(record.is_pristine());

    // Reset then the read that followed it.
    let logs = service.audit_log().list().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].method, AuditMethod::Read);
    assert_eq!(logs[1].method, AuditMethod::Delete);
}

#[tokio::test]
async fn second_verdict_is_refused_at_the_desk_but_not_the_service() {
    let service = instant_service();
    let desk = desk_for(&service);
    desk.login(TEAM_CODE, TEAM_PASSWORD, at(0)).await.unwrap();

    let first = desk
        .submit_verdict(complete_draft("The Butler"), at(60))
        .await
        .unwrap();
    let err = desk
        .submit_verdict(complete_draft("The Cook"), at(120))
        .await
        .unwrap_err();
    assert!(matches!(err, DeskError::VerdictSealed));
    assert_eq!(
        service.get_state().await.unwrap().verdict().unwrap().culprit,
        "The Butler"
    );

    // The service itself still accepts a replacement.
    let mut replacement = first.clone();
    replacement.culprit = "The Cook".to_string();
    service.submit_verdict(replacement).await.unwrap();
    assert_eq!(
        service.get_state().await.unwrap().verdict().unwrap().culprit,
        "The Cook"
    );
}

#[tokio::test]
async fn after_reset_a_new_login_starts_a_new_clock() {
    let service = instant_service();
    let desk = desk_for(&service);

    desk.login(TEAM_CODE, TEAM_PASSWORD, at(100)).await.unwrap();
    service.reset().await.unwrap();
    let start = desk.login(TEAM_CODE, TEAM_PASSWORD, at(900)).await.unwrap();
    assert_eq!(start, at(900));

    let elapsed = desk.elapsed(at(960)).await.unwrap();
    assert_eq!(elapsed, Some(Duration::from_secs(60)));
}

#[tokio::test]
async fn elapsed_is_none_before_login() {
    let service = instant_service();
    let desk = desk_for(&service);
    assert_eq!(desk.elapsed(at(5)).await.unwrap(), None);
}

#[tokio::test]
async fn repeated_confirmation_keeps_one_entry() {
    let service = instant_service();
    let desk = desk_for(&service);

    for _ in 0..3 {
        let check = desk.verify_code("wit-07").await.unwrap();
        assert!(matches!(check, EvidenceCheck::Confirmed(entry) if entry.code == "WIT-07"));
    }

    let record = service.get_state().await.unwrap();
    assert_eq!(record.verified_codes().len(), 1);
    let evidence_writes = service
        .audit_log()
        .list()
        .unwrap()
        .iter()
        .filter(|entry| entry.endpoint.contains("evidence/"))
        .count();
    assert_eq!(evidence_writes, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_never_lose_evidence() {
    let service = instant_service();
    let codes = ["PHY-09", "DIG-14", "CCTV-21", "FOR-33", "WIT-07", "SUS-56"];

    let tasks: Vec<_> = codes
        .iter()
        .flat_map(|code| {
            let lower = code.to_lowercase();
            [code.to_string(), lower]
        })
        .map(|code| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.verify_evidence(code).await })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().unwrap());
    }

    let record = service.get_state().await.unwrap();
    let mut stored: Vec<&str> = record.verified_codes().iter().map(|c| c.as_str()).collect();
    stored.sort_unstable();
    let mut expected = codes.to_vec();
    expected.sort_unstable();
    assert_eq!(stored, expected);
}

#[tokio::test(start_paused = true)]
async fn default_latencies_are_observable() {
    let service = Arc::new(LocalSessionService::builder().build());
    assert_eq!(service.latency(), LatencyProfile::default());
    let desk = desk_for(&service);

    let started = tokio::time::Instant::now();
    service.update_notes("n".to_string()).await.unwrap();
    let notes = started.elapsed();
    assert!(notes >= Duration::from_millis(600) && notes < Duration::from_millis(700));

    let started = tokio::time::Instant::now();
    service.verify_evidence("FOR-33".to_string()).await.unwrap();
    let evidence = started.elapsed();
    assert!(evidence >= Duration::from_millis(1200) && evidence < Duration::from_millis(1300));

    // The desk reads the record before submitting: 400ms, then 2000ms.
    let started = tokio::time::Instant::now();
    desk.submit_verdict(complete_draft("The Driver"), at(1))
        .await
        .unwrap();
    let verdict = started.elapsed();
    assert!(verdict >= Duration::from_millis(2400) && verdict < Duration::from_millis(2500));
}
