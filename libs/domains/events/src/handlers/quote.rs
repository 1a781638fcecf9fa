use chrono::Utc;
use tracing::warn;

use crate::engine::Outcome;
use crate::error::EventResult;
use crate::models::RequestStatus;
use crate::payload::EventPayload;
use crate::repository::NormalizedStore;

const ID_KEYS: &[&str] = &["requestId", "request_id", "solicitudId", "id"];

/// Quote acceptance confirms an existing request. Acceptance cannot
/// retroactively create one: a missing request is a data-quality signal,
/// logged and dropped.
pub async fn apply<S: NormalizedStore>(
    store: &S,
    event_name: &str,
    payload: &EventPayload<'_>,
) -> EventResult<Outcome> {
    let Some(request_id) = payload.id(ID_KEYS) else {
        warn!(event_name, "quote acceptance without a resolvable request id, dropping");
        return Ok(Outcome::Skipped);
    };

    let Some(mut record) = store.find_request(request_id).await? else {
        warn!(request_id, "quote acceptance for unknown request, dropping");
        return Ok(Outcome::Skipped);
    };

    let now = Utc::now();
    record.status = RequestStatus::Accepted;
    record.confirmed_at = Some(now);
    record.updated_at = now;

    store.save_request(record).await?;
    Ok(Outcome::Applied)
}
