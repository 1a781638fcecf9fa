use chrono::Utc;
use serde_json::Value;
use tracing::warn;

use crate::engine::Outcome;
use crate::error::EventResult;
use crate::models::{ProviderRecord, ProviderStatus, SkillAssociation, ZoneAssociation};
use crate::payload::EventPayload;
use crate::repository::NormalizedStore;

const ID_KEYS: &[&str] = &["providerId", "provider_id", "prestadorId", "id"];
const FIRST_NAME_KEYS: &[&str] = &["firstName", "nombre"];
const LAST_NAME_KEYS: &[&str] = &["lastName", "apellido"];
const PHOTO_KEYS: &[&str] = &["photo", "photoUrl", "foto"];
const SKILL_ID_KEYS: &[&str] = &["skillId", "skill_id", "id"];
const SKILL_NAME_KEYS: &[&str] = &["name", "nombre"];
const CATEGORY_KEYS: &[&str] = &["categoryId", "rubroId"];
const ZONE_ID_KEYS: &[&str] = &["zoneId", "zone_id", "id"];
const ZONE_NAME_KEYS: &[&str] = &["name", "nombre"];

/// Upsert a provider plus its embedded skill and zone associations.
///
/// Deactivation events set status only and leave associations untouched, so
/// a reactivated provider keeps its catalog.
pub async fn apply<S: NormalizedStore>(
    store: &S,
    event_name: &str,
    payload: &EventPayload<'_>,
) -> EventResult<Outcome> {
    let Some(external_id) = payload.id(ID_KEYS) else {
        warn!(event_name, "provider event without a resolvable provider id, dropping");
        return Ok(Outcome::Skipped);
    };

    let now = Utc::now();
    let name = event_name.to_lowercase();
    let mut record = store
        .find_provider(external_id)
        .await?
        .unwrap_or_else(|| ProviderRecord::new(external_id, now));

    if name.contains("deactivat") || name.contains("baja") {
        record.status = ProviderStatus::Deactivated;
        record.updated_at = now;
        store.save_provider(record).await?;
        return Ok(Outcome::Applied);
    }
    record.status = ProviderStatus::Active;

    if let Some(first_name) = payload.text(FIRST_NAME_KEYS) {
        record.first_name = Some(first_name);
    }
    if let Some(last_name) = payload.text(LAST_NAME_KEYS) {
        record.last_name = Some(last_name);
    }

    let skills = payload.array("skills").or_else(|| payload.array("oficios"));
    let zones = payload.array("zones").or_else(|| payload.array("zonas"));

    record.profile_complete = record.first_name.is_some()
        && record.last_name.is_some()
        && payload.text(PHOTO_KEYS).is_some()
        && zones.is_some()
        && skills.is_some();
    record.updated_at = now;
    store.save_provider(record).await?;

    if let Some(skills) = skills {
        for item in skills {
            save_skill(store, external_id, item).await?;
        }
    }
    if let Some(zones) = zones {
        for item in zones {
            save_zone(store, external_id, item).await?;
        }
    }

    Ok(Outcome::Applied)
}

async fn save_skill<S: NormalizedStore>(
    store: &S,
    provider_id: i64,
    item: &Value,
) -> EventResult<()> {
    let Some(fields) = item.as_object() else {
        return Ok(());
    };
    let view = EventPayload::from_fields(fields);
    let Some(skill_id) = view.id(SKILL_ID_KEYS) else {
        warn!(provider_id, "skill entry without an id, skipping");
        return Ok(());
    };
    store
        .save_skill(SkillAssociation {
            provider_id,
            skill_id,
            skill_name: view.text(SKILL_NAME_KEYS).unwrap_or_default(),
            category_id: view.id(CATEGORY_KEYS),
            active: true,
        })
        .await
}

async fn save_zone<S: NormalizedStore>(
    store: &S,
    provider_id: i64,
    item: &Value,
) -> EventResult<()> {
    let Some(fields) = item.as_object() else {
        return Ok(());
    };
    let view = EventPayload::from_fields(fields);
    let Some(zone_id) = view.id(ZONE_ID_KEYS) else {
        warn!(provider_id, "zone entry without an id, skipping");
        return Ok(());
    };
    store
        .save_provider_zone(ZoneAssociation {
            provider_id,
            zone_id,
            zone_name: view.text(ZONE_NAME_KEYS).unwrap_or_default(),
            active: true,
        })
        .await
}
