//! Reconciliation tests for the normalization engine.
//!
//! Each test drives raw events through the engine against an in-memory
//! store and asserts on the resulting normalized rows.

mod common;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{raw_event, MemoryStore};
use domain_events::{
    NormalizationEngine, Outcome, PaymentStatus, ProviderStatus, RequestStatus, UserStatus,
    PLACEHOLDER_ID_OFFSET,
};
use serde_json::json;

fn engine_with_store() -> (NormalizationEngine<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (NormalizationEngine::from_arc(store.clone()), store)
}

// ============================================================================
// Classification & dispatch
// ============================================================================

#[tokio::test]
async fn test_category_wins_over_name_substring() {
    let (engine, store) = engine_with_store();
    // Name mentions "user" but category says payment; dispatch order puts
    // the category check first.
    let event = raw_event(
        1,
        "payment",
        "user-payment-created",
        json!({ "paymentId": 77, "userId": 5, "amount": 100.0, "status": "approved" }),
    );

    assert_eq!(engine.normalize_event(&event).await, Outcome::Applied);
    assert!(store.payments.lock().unwrap().contains_key(&77));
    assert!(store.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unclassified_event_is_dropped_not_failed() {
    let (engine, store) = engine_with_store();
    let event = raw_event(1, "telemetry", "heartbeat", json!({ "id": 1 }));

    assert_eq!(engine.normalize_event(&event).await, Outcome::Skipped);
    assert!(store.users.lock().unwrap().is_empty());
    assert!(store.payments.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_envelope_body_is_unwrapped() {
    let (engine, store) = engine_with_store();
    let event = raw_event(
        1,
        "user",
        "user-created",
        json!({ "payload": { "userId": 12, "role": "client" }, "meta": { "hop": 2 } }),
    );

    assert_eq!(engine.normalize_event(&event).await, Outcome::Applied);
    let users = store.users.lock().unwrap();
    let user = users.get(&12).expect("user row");
    assert_eq!(user.role_tag.as_deref(), Some("client"));
}

// ============================================================================
// User handler
// ============================================================================

#[tokio::test]
async fn test_user_deactivation_stamps_timestamp_once() {
    let (engine, store) = engine_with_store();
    let deactivate = raw_event(1, "user", "user-deactivated", json!({ "userId": 3 }));

    assert_eq!(engine.normalize_event(&deactivate).await, Outcome::Applied);
    let first_stamp = store
        .users
        .lock()
        .unwrap()
        .get(&3)
        .and_then(|user| user.deactivated_at)
        .expect("deactivation timestamp");

    // Replaying the deactivation keeps the original stamp.
    assert_eq!(engine.normalize_event(&deactivate).await, Outcome::Applied);
    let users = store.users.lock().unwrap();
    let user = users.get(&3).unwrap();
    assert_eq!(user.status, UserStatus::Deactivated);
    assert_eq!(user.deactivated_at, Some(first_stamp));
}

#[tokio::test]
async fn test_user_event_without_id_is_skipped() {
    let (engine, store) = engine_with_store();
    let event = raw_event(1, "user", "user-created", json!({ "role": "client" }));

    assert_eq!(engine.normalize_event(&event).await, Outcome::Skipped);
    assert!(store.users.lock().unwrap().is_empty());
}

// ============================================================================
// Payment handler: state machine
// ============================================================================

#[tokio::test]
async fn test_payment_idempotence() {
    let (engine, store) = engine_with_store();
    let event = raw_event(
        1,
        "payment",
        "payment-created",
        json!({ "paymentId": 500, "requestId": 9, "amount": 1500.5, "status": "pending" }),
    );

    assert_eq!(engine.normalize_event(&event).await, Outcome::Applied);
    let first = store.payments.lock().unwrap().get(&500).cloned().unwrap();

    assert_eq!(engine.normalize_event(&event).await, Outcome::Applied);
    let payments = store.payments.lock().unwrap();
    assert_eq!(payments.len(), 1);
    let second = payments.get(&500).unwrap();
    assert_eq!(second.amount, first.amount);
    assert_eq!(second.status, first.status);
    assert_eq!(second.captured_at, first.captured_at);
}

#[tokio::test]
async fn test_terminal_status_never_regresses_to_pending() {
    let (engine, store) = engine_with_store();
    let approve = raw_event(
        1,
        "payment",
        "payment-updated",
        json!({ "paymentId": 42, "status": "approved", "amount": 200.0 }),
    );
    let stale_create = raw_event(
        2,
        "payment",
        "payment-created",
        json!({ "paymentId": 42, "status": "pending" }),
    );

    engine.normalize_event(&approve).await;
    assert_eq!(engine.normalize_event(&stale_create).await, Outcome::Applied);

    let payments = store.payments.lock().unwrap();
    assert_eq!(payments.get(&42).unwrap().status, PaymentStatus::Approved);
}

#[tokio::test]
async fn test_method_selection_never_changes_status() {
    let (engine, store) = engine_with_store();
    let approve = raw_event(
        1,
        "payment",
        "payment-updated",
        json!({ "paymentId": 8, "status": "aprobado" }),
    );
    let method = raw_event(
        2,
        "payment",
        "payment-method-selected",
        json!({ "paymentId": 8, "method": "credit_card", "status": "pending" }),
    );

    engine.normalize_event(&approve).await;
    engine.normalize_event(&method).await;

    let payments = store.payments.lock().unwrap();
    let payment = payments.get(&8).unwrap();
    assert_eq!(payment.status, PaymentStatus::Approved);
    assert_eq!(payment.method.as_deref(), Some("credit_card"));
}

#[tokio::test]
async fn test_captured_at_set_only_on_approval() {
    let (engine, store) = engine_with_store();
    let pending = raw_event(
        1,
        "payment",
        "payment-created",
        json!({ "paymentId": 60, "status": "pending" }),
    );
    let approve = raw_event(
        2,
        "payment",
        "payment-updated",
        json!({ "paymentId": 60, "status": "approved", "dateLastUpdated": [2026, 3, 4, 12, 0, 0] }),
    );

    engine.normalize_event(&pending).await;
    assert!(store
        .payments
        .lock()
        .unwrap()
        .get(&60)
        .unwrap()
        .captured_at
        .is_none());

    engine.normalize_event(&approve).await;
    let payments = store.payments.lock().unwrap();
    let captured = payments.get(&60).unwrap().captured_at.expect("captured_at");
    assert_eq!(
        captured,
        "2026-03-04T12:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
}

#[tokio::test]
async fn test_explicit_update_timestamp_refreshes_capture() {
    let (engine, store) = engine_with_store();
    let approve = raw_event(
        1,
        "payment",
        "payment-updated",
        json!({ "paymentId": 61, "status": "approved" }),
    );
    let approve_with_timestamp = raw_event(
        2,
        "payment",
        "payment-updated",
        json!({ "paymentId": 61, "status": "approved", "dateLastUpdated": [2026, 6, 1, 8, 0, 0] }),
    );

    engine.normalize_event(&approve).await;
    let fallback = store
        .payments
        .lock()
        .unwrap()
        .get(&61)
        .unwrap()
        .captured_at
        .expect("captured_at");

    // A later approved event with an explicit producer timestamp is
    // authoritative over the processing-time fallback.
    engine.normalize_event(&approve_with_timestamp).await;
    let payments = store.payments.lock().unwrap();
    let captured = payments.get(&61).unwrap().captured_at.unwrap();
    assert_ne!(captured, fallback);
    assert_eq!(captured, "2026-06-01T08:00:00Z".parse::<DateTime<Utc>>().unwrap());
}

#[tokio::test]
async fn test_placeholder_created_then_refreshed() {
    let (engine, store) = engine_with_store();
    let intent = raw_event(
        1,
        "pago",
        "matching-payment-intent",
        json!({ "requestId": 30, "payment": { "amount": 100.0, "method": "cash" } }),
    );
    let refresh = raw_event(
        2,
        "pago",
        "matching-payment-intent",
        json!({ "requestId": 30, "payment": { "amount": 250.0, "method": "credit_card" } }),
    );

    engine.normalize_event(&intent).await;
    let placeholder_id = 30 + PLACEHOLDER_ID_OFFSET;
    {
        let payments = store.payments.lock().unwrap();
        let placeholder = payments.get(&placeholder_id).expect("placeholder row");
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.amount, 100.0);
    }

    engine.normalize_event(&refresh).await;
    let payments = store.payments.lock().unwrap();
    assert_eq!(payments.len(), 1);
    let placeholder = payments.get(&placeholder_id).unwrap();
    assert_eq!(placeholder.amount, 250.0);
    assert_eq!(placeholder.method.as_deref(), Some("credit_card"));
}

#[tokio::test]
async fn test_real_payment_supersedes_placeholder() {
    let (engine, store) = engine_with_store();
    let intent = raw_event(
        1,
        "pago",
        "matching-payment-intent",
        json!({ "requestId": 30, "payment": { "amount": 100.0 } }),
    );
    let real = raw_event(
        2,
        "payment",
        "payment-created",
        json!({ "paymentId": 777, "requestId": 30, "amount": 100.0, "status": "approved" }),
    );

    engine.normalize_event(&intent).await;
    engine.normalize_event(&real).await;

    let payments = store.payments.lock().unwrap();
    assert!(!payments.contains_key(&(30 + PLACEHOLDER_ID_OFFSET)));
    let payment = payments.get(&777).expect("real payment row");
    assert_eq!(payment.status, PaymentStatus::Approved);
    assert_eq!(payment.request_id, Some(30));
}

#[tokio::test]
async fn test_matching_event_after_real_payment_is_noop() {
    let (engine, store) = engine_with_store();
    let real = raw_event(
        1,
        "payment",
        "payment-created",
        json!({ "paymentId": 777, "requestId": 30, "amount": 100.0, "status": "approved" }),
    );
    let late_intent = raw_event(
        2,
        "pago",
        "matching-payment-intent",
        json!({ "requestId": 30, "payment": { "amount": 999.0 } }),
    );

    engine.normalize_event(&real).await;
    assert_eq!(engine.normalize_event(&late_intent).await, Outcome::Skipped);

    let payments = store.payments.lock().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments.get(&777).unwrap().amount, 100.0);
}

#[tokio::test]
async fn test_alphanumeric_payment_id_is_coerced() {
    let (engine, store) = engine_with_store();
    let event = raw_event(
        1,
        "payment",
        "payment-created",
        json!({ "paymentId": "PAY_00123", "amount": 50.0, "status": "pending" }),
    );

    assert_eq!(engine.normalize_event(&event).await, Outcome::Applied);
    assert!(store.payments.lock().unwrap().contains_key(&123));
}

// ============================================================================
// Request & quote-acceptance handlers
// ============================================================================

#[tokio::test]
async fn test_request_lifecycle_and_assignment_flag() {
    let (engine, store) = engine_with_store();
    let created = raw_event(
        1,
        "request",
        "request-created",
        json!({ "requestId": 11, "userId": 4, "skillId": 2, "isCritical": true }),
    );
    let assigned = raw_event(
        2,
        "request",
        "provider-assigned",
        json!({ "requestId": 11, "providerId": 99 }),
    );
    let cancelled = raw_event(3, "request", "request-cancelled", json!({ "requestId": 11 }));

    engine.normalize_event(&created).await;
    engine.normalize_event(&assigned).await;
    {
        let requests = store.requests.lock().unwrap();
        let request = requests.get(&11).unwrap();
        assert_eq!(request.status, RequestStatus::Created);
        assert!(request.provider_assigned);
        assert!(request.is_critical);
        assert_eq!(request.provider_id, Some(99));
    }

    engine.normalize_event(&cancelled).await;
    let requests = store.requests.lock().unwrap();
    let request = requests.get(&11).unwrap();
    assert_eq!(request.status, RequestStatus::Cancelled);
    // Cancellation carries no criticality claim; the flag survives.
    assert!(request.is_critical);
}

#[tokio::test]
async fn test_assignment_event_makes_no_status_claim() {
    let (engine, store) = engine_with_store();
    let created = raw_event(1, "request", "request-created", json!({ "requestId": 70 }));
    let accepted = raw_event(2, "quote", "quote-accepted", json!({ "requestId": 70 }));
    let assigned = raw_event(
        3,
        "request",
        "request-provider-assigned",
        json!({ "requestId": 70, "providerId": 99 }),
    );

    engine.normalize_event(&created).await;
    engine.normalize_event(&accepted).await;
    engine.normalize_event(&assigned).await;

    let requests = store.requests.lock().unwrap();
    let request = requests.get(&70).unwrap();
    // Assignment is independent of status: the accepted request stays
    // accepted while the flag and provider id are picked up.
    assert_eq!(request.status, RequestStatus::Accepted);
    assert!(request.provider_assigned);
    assert_eq!(request.provider_id, Some(99));
}

#[tokio::test]
async fn test_update_event_keeps_cancelled_status() {
    let (engine, store) = engine_with_store();
    let created = raw_event(1, "request", "request-created", json!({ "requestId": 71 }));
    let cancelled = raw_event(2, "request", "request-cancelled", json!({ "requestId": 71 }));
    let updated = raw_event(
        3,
        "request",
        "request-updated",
        json!({ "requestId": 71, "skillId": 4 }),
    );

    engine.normalize_event(&created).await;
    engine.normalize_event(&cancelled).await;
    engine.normalize_event(&updated).await;

    let requests = store.requests.lock().unwrap();
    let request = requests.get(&71).unwrap();
    assert_eq!(request.status, RequestStatus::Cancelled);
    assert_eq!(request.skill_id, Some(4));
}

#[tokio::test]
async fn test_zone_normalized_against_catalog() {
    let (engine, store) = engine_with_store();
    store.seed_zone(1, "Palermo", true);
    let event = raw_event(
        1,
        "request",
        "request-created",
        json!({ "requestId": 5, "address": { "zone": "  palermo " } }),
    );

    engine.normalize_event(&event).await;
    let requests = store.requests.lock().unwrap();
    assert_eq!(requests.get(&5).unwrap().zone_name.as_deref(), Some("Palermo"));
}

#[tokio::test]
async fn test_unmatched_zone_kept_verbatim() {
    let (engine, store) = engine_with_store();
    let event = raw_event(
        1,
        "request",
        "request-created",
        json!({ "requestId": 6, "zone": "Barrio Desconocido" }),
    );

    engine.normalize_event(&event).await;
    let requests = store.requests.lock().unwrap();
    assert_eq!(
        requests.get(&6).unwrap().zone_name.as_deref(),
        Some("Barrio Desconocido")
    );
}

#[tokio::test]
async fn test_zone_inferred_from_provider_when_absent() {
    let (engine, store) = engine_with_store();
    let provider = raw_event(
        1,
        "provider",
        "provider-created",
        json!({
            "providerId": 40,
            "firstName": "Ana",
            "zones": [{ "zoneId": 7, "name": "Caballito" }]
        }),
    );
    let request = raw_event(
        2,
        "request",
        "request-created",
        json!({ "requestId": 13, "providerId": 40 }),
    );

    engine.normalize_event(&provider).await;
    engine.normalize_event(&request).await;

    let requests = store.requests.lock().unwrap();
    assert_eq!(
        requests.get(&13).unwrap().zone_name.as_deref(),
        Some("Caballito")
    );
}

#[tokio::test]
async fn test_quote_acceptance_confirms_existing_request() {
    let (engine, store) = engine_with_store();
    let created = raw_event(1, "request", "request-created", json!({ "requestId": 21 }));
    let accepted = raw_event(2, "quote", "quote-accepted", json!({ "requestId": 21 }));

    engine.normalize_event(&created).await;
    assert_eq!(engine.normalize_event(&accepted).await, Outcome::Applied);

    let requests = store.requests.lock().unwrap();
    let request = requests.get(&21).unwrap();
    assert_eq!(request.status, RequestStatus::Accepted);
    assert!(request.confirmed_at.is_some());
}

#[tokio::test]
async fn test_quote_acceptance_for_unknown_request_is_dropped() {
    let (engine, store) = engine_with_store();
    let accepted = raw_event(1, "quote", "quote-accepted", json!({ "requestId": 404 }));

    assert_eq!(engine.normalize_event(&accepted).await, Outcome::Skipped);
    assert!(store.requests.lock().unwrap().is_empty());
}

// ============================================================================
// Provider & category handlers
// ============================================================================

#[tokio::test]
async fn test_provider_profile_completeness() {
    let (engine, store) = engine_with_store();
    let partial = raw_event(
        1,
        "provider",
        "provider-created",
        json!({ "providerId": 50, "firstName": "Ana" }),
    );
    let full = raw_event(
        2,
        "provider",
        "provider-updated",
        json!({
            "providerId": 50,
            "firstName": "Ana",
            "lastName": "Gomez",
            "photo": "https://cdn.example/ana.jpg",
            "skills": [{ "skillId": 1, "name": "Plomeria", "categoryId": 3 }],
            "zones": [{ "zoneId": 7, "name": "Caballito" }]
        }),
    );

    engine.normalize_event(&partial).await;
    assert!(!store.providers.lock().unwrap().get(&50).unwrap().profile_complete);

    engine.normalize_event(&full).await;
    assert!(store.providers.lock().unwrap().get(&50).unwrap().profile_complete);
    assert!(store.skills.lock().unwrap().contains_key(&(50, 1)));
    assert!(store.provider_zones.lock().unwrap().contains_key(&(50, 7)));
}

#[tokio::test]
async fn test_provider_deactivation_keeps_associations() {
    let (engine, store) = engine_with_store();
    let created = raw_event(
        1,
        "provider",
        "provider-created",
        json!({
            "providerId": 51,
            "firstName": "Juan",
            "skills": [{ "skillId": 2, "name": "Electricidad" }]
        }),
    );
    let deactivated = raw_event(
        2,
        "provider",
        "provider-deactivated",
        json!({ "providerId": 51 }),
    );

    engine.normalize_event(&created).await;
    engine.normalize_event(&deactivated).await;

    assert_eq!(
        store.providers.lock().unwrap().get(&51).unwrap().status,
        ProviderStatus::Deactivated
    );
    assert!(store.skills.lock().unwrap().contains_key(&(51, 2)));
}

#[tokio::test]
async fn test_category_upsert_and_hard_delete() {
    let (engine, store) = engine_with_store();
    let created = raw_event(
        1,
        "category",
        "category-created",
        json!({ "categoryId": 3, "name": "Plomeria" }),
    );
    let deactivated = raw_event(
        2,
        "category",
        "category-deactivated",
        json!({ "categoryId": 3 }),
    );

    engine.normalize_event(&created).await;
    assert_eq!(
        store.categories.lock().unwrap().get(&3).map(|c| c.name.clone()),
        Some("Plomeria".to_string())
    );

    engine.normalize_event(&deactivated).await;
    assert!(store.categories.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_zone_catalog_event_is_inert() {
    let (engine, store) = engine_with_store();
    let event = raw_event(
        1,
        "zone",
        "zone-created",
        json!({ "zoneId": 9, "name": "Flores" }),
    );

    assert_eq!(engine.normalize_event(&event).await, Outcome::Skipped);
    assert!(store.zones.lock().unwrap().is_empty());
}
