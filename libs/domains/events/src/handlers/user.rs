use chrono::Utc;
use tracing::warn;

use crate::engine::Outcome;
use crate::error::EventResult;
use crate::models::{UserRecord, UserStatus};
use crate::payload::EventPayload;
use crate::repository::NormalizedStore;

const ID_KEYS: &[&str] = &["userId", "user_id", "usuarioId", "id"];
const ROLE_KEYS: &[&str] = &["role", "roleTag", "tipo"];
const LOCATION_KEYS: &[&str] = &["location", "city", "localidad"];

/// Upsert a user from a lifecycle event. Status is derived from the event
/// name; deactivation stamps a timestamp once and never clears it.
pub async fn apply<S: NormalizedStore>(
    store: &S,
    event_name: &str,
    payload: &EventPayload<'_>,
) -> EventResult<Outcome> {
    let Some(external_id) = payload.id(ID_KEYS) else {
        warn!(event_name, "user event without a resolvable user id, dropping");
        return Ok(Outcome::Skipped);
    };

    let now = Utc::now();
    let name = event_name.to_lowercase();
    let mut record = store
        .find_user(external_id)
        .await?
        .unwrap_or_else(|| UserRecord::new(external_id, now));

    if name.contains("deactivat") || name.contains("baja") {
        record.status = UserStatus::Deactivated;
        if record.deactivated_at.is_none() {
            record.deactivated_at = Some(now);
        }
    } else if name.contains("reject") || name.contains("rechaz") {
        record.status = UserStatus::Rejected;
    } else {
        record.status = UserStatus::Active;
    }

    if let Some(role) = payload.text(ROLE_KEYS) {
        record.role_tag = Some(role);
    }
    if let Some(location) = payload.text(LOCATION_KEYS) {
        record.location = Some(location);
    }
    record.updated_at = now;

    store.save_user(record).await?;
    Ok(Outcome::Applied)
}
