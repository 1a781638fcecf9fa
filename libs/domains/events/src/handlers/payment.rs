use chrono::Utc;
use tracing::{info, warn};

use crate::engine::Outcome;
use crate::error::EventResult;
use crate::models::{PaymentRecord, PaymentStatus, PLACEHOLDER_ID_OFFSET};
use crate::payload::EventPayload;
use crate::repository::NormalizedStore;

const PAYMENT_ID_KEYS: &[&str] = &["paymentId", "payment_id", "id"];
const REQUEST_KEYS: &[&str] = &["requestId", "request_id", "solicitudId"];
const PAYER_KEYS: &[&str] = &["payerId", "userId", "user_id", "clienteId"];
const PROVIDER_KEYS: &[&str] = &["providerId", "provider_id", "prestadorId"];
const AMOUNT_KEYS: &[&str] = &["amount", "monto", "total"];
const CURRENCY_KEYS: &[&str] = &["currency", "moneda"];
const METHOD_KEYS: &[&str] = &["method", "paymentMethod", "medioDePago"];
const STATUS_KEYS: &[&str] = &["status", "estado"];
const REFUND_KEYS: &[&str] = &["refundId", "refund_id"];
const UPDATED_KEYS: &[&str] = &[
    "dateLastUpdated",
    "date_last_updated",
    "updatedAt",
    "fechaActualizacion",
];

/// Payment reconciliation state machine.
///
/// Two producer shapes arrive here. The matching producer announces an
/// intended payment before any real payment record exists, nesting fields
/// under a `payment` sub-key with no stable payment id; it is materialized
/// as a placeholder row keyed into a disjoint synthetic range. The payment
/// producer carries a real id and supersedes any placeholder for the same
/// request. Status transitions are monotonic with respect to terminality.
pub async fn apply<S: NormalizedStore>(
    store: &S,
    event_name: &str,
    payload: &EventPayload<'_>,
) -> EventResult<Outcome> {
    if let Some(nested) = payload.object("payment") {
        return apply_matching(store, payload, &nested).await;
    }
    apply_direct(store, event_name, payload).await
}

/// Matching-producer shape: no stable payment id, placeholder lifecycle.
async fn apply_matching<S: NormalizedStore>(
    store: &S,
    outer: &EventPayload<'_>,
    nested: &EventPayload<'_>,
) -> EventResult<Outcome> {
    let Some(request_id) = outer.id(REQUEST_KEYS).or_else(|| nested.id(REQUEST_KEYS)) else {
        warn!("matching payment event without a request id, dropping");
        return Ok(Outcome::Skipped);
    };

    if let Some(existing) = store.find_payment_by_request(request_id).await? {
        if !existing.is_placeholder() {
            // A real payment fully supersedes the matching signal.
            return Ok(Outcome::Skipped);
        }
        if existing.status == PaymentStatus::Pending && existing.captured_at.is_none() {
            let mut record = existing;
            if let Some(amount) = nested.decimal(AMOUNT_KEYS).or_else(|| outer.decimal(AMOUNT_KEYS))
            {
                record.amount = amount;
            }
            if let Some(method) = nested.text(METHOD_KEYS).or_else(|| outer.text(METHOD_KEYS)) {
                record.method = Some(method);
            }
            record.updated_at = Utc::now();
            store.save_payment(record).await?;
            return Ok(Outcome::Applied);
        }
        // Captured or finalized placeholder; a late matching replay has
        // nothing left to claim.
        return Ok(Outcome::Skipped);
    }

    let now = Utc::now();
    let mut record = PaymentRecord::new(request_id + PLACEHOLDER_ID_OFFSET, now);
    record.request_id = Some(request_id);
    record.payer_id = outer.id(PAYER_KEYS).or_else(|| nested.id(PAYER_KEYS));
    record.provider_id = outer.id(PROVIDER_KEYS).or_else(|| nested.id(PROVIDER_KEYS));
    if let Some(amount) = nested.decimal(AMOUNT_KEYS).or_else(|| outer.decimal(AMOUNT_KEYS)) {
        record.amount = amount;
    }
    if let Some(currency) = nested.text(CURRENCY_KEYS).or_else(|| outer.text(CURRENCY_KEYS)) {
        record.currency = currency;
    }
    record.method = nested.text(METHOD_KEYS).or_else(|| outer.text(METHOD_KEYS));

    if record.payer_id.is_none() {
        warn!(request_id, "placeholder payment created without a payer, awaiting backfill");
    }
    store.save_payment(record).await?;
    Ok(Outcome::Applied)
}

/// Payment-producer shape: real id, full status merge.
async fn apply_direct<S: NormalizedStore>(
    store: &S,
    event_name: &str,
    payload: &EventPayload<'_>,
) -> EventResult<Outcome> {
    let Some(payment_id) = payload.id(PAYMENT_ID_KEYS) else {
        warn!(event_name, "payment event without a resolvable payment id, dropping");
        return Ok(Outcome::Skipped);
    };

    let now = Utc::now();
    let existing = store.find_payment(payment_id).await?;
    let request_id = payload.id(REQUEST_KEYS);

    if existing.is_none() {
        if let Some(request_id) = request_id {
            // The real record replaces any placeholder under its own id.
            let placeholder_id = request_id + PLACEHOLDER_ID_OFFSET;
            if store.delete_payment(placeholder_id).await? {
                info!(payment_id, placeholder_id, "placeholder superseded by real payment");
            }
        }
    }

    let had_row = existing.is_some();
    let mut record = existing.unwrap_or_else(|| PaymentRecord::new(payment_id, now));

    if let Some(request_id) = request_id {
        record.request_id = Some(request_id);
    }
    if let Some(payer_id) = payload.id(PAYER_KEYS) {
        record.payer_id = Some(payer_id);
    }
    if let Some(provider_id) = payload.id(PROVIDER_KEYS) {
        record.provider_id = Some(provider_id);
    }
    if let Some(amount) = payload.decimal(AMOUNT_KEYS) {
        record.amount = amount;
    }
    if let Some(currency) = payload.text(CURRENCY_KEYS) {
        record.currency = currency;
    }
    if let Some(method) = payload.text(METHOD_KEYS) {
        record.method = Some(method);
    }
    if let Some(refund_id) = payload.id(REFUND_KEYS) {
        record.refund_id = Some(refund_id);
    }

    let name = event_name.to_lowercase();
    let method_selection = name.contains("method") || name.contains("medio");
    if !method_selection {
        let claimed = payload
            .text(STATUS_KEYS)
            .and_then(|tag| PaymentStatus::from_tag(&tag))
            .unwrap_or(PaymentStatus::Pending);
        if had_row && record.status.is_terminal() && claimed == PaymentStatus::Pending {
            warn!(
                payment_id,
                status = %record.status,
                "created-class event replayed after finalization, keeping terminal status"
            );
        } else {
            record.status = claimed;
        }
    }

    if record.status == PaymentStatus::Approved {
        // An explicit update timestamp from the producer is authoritative
        // and may refresh an earlier capture; the processing-time fallback
        // is only stamped once.
        if let Some(explicit) = payload.timestamp(UPDATED_KEYS) {
            record.captured_at = Some(explicit);
        } else if record.captured_at.is_none() {
            record.captured_at = Some(now);
        }
    }
    if record.payer_id.is_none() {
        warn!(payment_id, "payment stored without a payer, awaiting backfill");
    }
    record.updated_at = now;

    let status = record.status;
    store.save_payment(record).await?;
    info!(payment_id, status = %status, "payment reconciled");
    Ok(Outcome::Applied)
}
