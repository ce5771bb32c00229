// Unit tests for the resolution and confirmation workflow

use chrono::Utc;
use shabbat_match::core::{derive_status, ConfirmationEngine, MatchError, MatchResolver};
use shabbat_match::models::{Match, MatchStatus, RequestStatus, Role, StudentRequest, User};
use shabbat_match::services::InMemoryStore;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

fn request(id: i64, student_id: i64) -> StudentRequest {
    StudentRequest {
        id,
        student_id,
        location: "Jerusalem".to_string(),
        num_guests: 2,
        status: RequestStatus::Matched,
        created_at: Utc::now(),
    }
}

fn fresh_match(id: i64, request_id: i64, host_id: i64) -> Match {
    Match {
        id,
        student_request_id: request_id,
        host_id,
        host_confirmed: false,
        student_confirmed: false,
        created_at: Utc::now(),
    }
}

/// Student S1 owns R1 and R2; R1 has M1 and M2, R2 has only M3
async fn scenario_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.insert_request(request(1, 1)).await;
    store.insert_request(request(2, 1)).await;
    store.insert_match(fresh_match(1, 1, 10)).await;
    store.insert_match(fresh_match(2, 1, 11)).await;
    store.insert_match(fresh_match(3, 2, 10)).await;
    store
}

#[test]
fn test_derive_status_is_pure_over_flags() {
    for host in [false, true] {
        for student in [false, true] {
            let mut record = fresh_match(1, 1, 1);
            record.host_confirmed = host;
            record.student_confirmed = student;

            let expected = derive_status(&record);
            assert_eq!(derive_status(&record.clone()), expected);
            assert_eq!(expected == MatchStatus::Finalized, host && student);
        }
    }
}

#[tokio::test]
async fn test_student_sees_matches_across_requests() {
    let store = scenario_store().await;
    let resolver = MatchResolver::new(store.clone(), store);

    let ids = resolver.resolve_matches_for_user(&User::student(1)).await.unwrap();

    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let store = scenario_store().await;
    let resolver = MatchResolver::new(store.clone(), store);

    let first = resolver.resolve_matches_for_user(&User::host(10)).await.unwrap();
    let second = resolver.resolve_matches_for_user(&User::host(10)).await.unwrap();

    assert_eq!(first, vec![1, 3]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_student_without_requests_is_empty() {
    let store = scenario_store().await;
    let resolver = MatchResolver::new(store.clone(), store);

    let ids = assert_ok!(resolver.resolve_matches_for_user(&User::student(99)).await);
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_other_role_is_empty_not_error() {
    let store = scenario_store().await;
    let resolver = MatchResolver::new(store.clone(), store);

    let ids = assert_ok!(resolver.resolve_matches_for_user(&User::new(1, Role::Unknown)).await);
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_host_then_student_walkthrough() {
    let store = scenario_store().await;
    let engine = ConfirmationEngine::new(store.clone(), store);

    let after_host = engine.confirm_match(1, Role::Host).await.unwrap();
    assert!(after_host.host_confirmed && !after_host.student_confirmed);
    assert_eq!(derive_status(&after_host), MatchStatus::PendingStudent);

    let after_student = engine.confirm_match(1, Role::Student).await.unwrap();
    assert!(after_student.host_confirmed && after_student.student_confirmed);
    assert_eq!(derive_status(&after_student), MatchStatus::Finalized);
}

#[tokio::test]
async fn test_single_role_never_finalizes() {
    let store = scenario_store().await;
    let engine = ConfirmationEngine::new(store.clone(), store);

    for _ in 0..3 {
        let record = engine.confirm_match(2, Role::Student).await.unwrap();
        assert_eq!(record.status(), MatchStatus::PendingHost);
    }
}

#[tokio::test]
async fn test_double_confirmation_matches_single() {
    let once_store = scenario_store().await;
    let twice_store = scenario_store().await;
    let once = ConfirmationEngine::new(once_store.clone(), once_store);
    let twice = ConfirmationEngine::new(twice_store.clone(), twice_store);

    let a = once.confirm_match(3, Role::Host).await.unwrap();
    twice.confirm_match(3, Role::Host).await.unwrap();
    let b = twice.confirm_match(3, Role::Host).await.unwrap();

    assert_eq!(a.host_confirmed, b.host_confirmed);
    assert_eq!(a.student_confirmed, b.student_confirmed);
}

#[tokio::test]
async fn test_confirming_missing_match_fails() {
    let store = scenario_store().await;
    let engine = ConfirmationEngine::new(store.clone(), store);

    let err = assert_err!(engine.confirm_match(999, Role::Host).await);
    assert!(matches!(err, MatchError::NotFound(_)));
}

#[tokio::test]
async fn test_concurrent_confirmations_both_apply() {
    let store = scenario_store().await;
    let engine = ConfirmationEngine::new(store.clone(), store.clone());

    let host = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.confirm_match(1, Role::Host).await })
    };
    let student = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.confirm_match(1, Role::Student).await })
    };

    assert_ok!(host.await.unwrap());
    assert_ok!(student.await.unwrap());

    let final_state = engine.confirm_match(1, Role::Host).await.unwrap();
    assert_eq!(final_state.status(), MatchStatus::Finalized);
}
