use tracing::{info, warn};

use crate::engine::Outcome;
use crate::error::EventResult;
use crate::models::CategoryRecord;
use crate::payload::EventPayload;
use crate::repository::NormalizedStore;

const ID_KEYS: &[&str] = &["categoryId", "category_id", "rubroId", "id"];
const NAME_KEYS: &[&str] = &["name", "nombre"];

/// Categories are a small reference catalog: upsert on create/update, hard
/// delete on deactivation.
pub async fn apply<S: NormalizedStore>(
    store: &S,
    event_name: &str,
    payload: &EventPayload<'_>,
) -> EventResult<Outcome> {
    let Some(external_id) = payload.id(ID_KEYS) else {
        warn!(event_name, "category event without a resolvable category id, dropping");
        return Ok(Outcome::Skipped);
    };

    let name = event_name.to_lowercase();
    if name.contains("deactivat") || name.contains("baja") {
        let deleted = store.delete_category(external_id).await?;
        if deleted {
            info!(category_id = external_id, "category deleted");
        }
        return Ok(Outcome::Applied);
    }

    let existing = store.find_category(external_id).await?;
    let record = CategoryRecord {
        external_id,
        name: payload
            .text(NAME_KEYS)
            .or(existing.map(|record| record.name))
            .unwrap_or_default(),
    };
    store.save_category(record).await?;
    Ok(Outcome::Applied)
}
