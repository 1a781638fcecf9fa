use chrono::Utc;
use tracing::{debug, warn};

use crate::engine::Outcome;
use crate::error::EventResult;
use crate::models::{RequestRecord, RequestStatus};
use crate::payload::EventPayload;
use crate::repository::NormalizedStore;

const ID_KEYS: &[&str] = &["requestId", "request_id", "solicitudId", "id"];
const REQUESTER_KEYS: &[&str] = &["userId", "user_id", "requesterId", "clienteId"];
const PROVIDER_KEYS: &[&str] = &["providerId", "provider_id", "prestadorId"];
const SKILL_KEYS: &[&str] = &["skillId", "skill_id", "oficioId"];
const CRITICAL_KEYS: &[&str] = &["isCritical", "critical", "urgente"];
const ADDRESS_KEYS: &[&str] = &["address", "direccion"];
const ZONE_KEYS: &[&str] = &["zone", "zona", "neighborhood"];

/// Upsert a service request from its lifecycle events.
///
/// Status is keyword-derived from the event name; an event whose name makes
/// no status claim leaves the stored status untouched. Provider assignment
/// is tracked as an independent flag since assignment events arrive both
/// before and after acceptance.
pub async fn apply<S: NormalizedStore>(
    store: &S,
    event_name: &str,
    payload: &EventPayload<'_>,
) -> EventResult<Outcome> {
    let Some(external_id) = payload.id(ID_KEYS) else {
        warn!(event_name, "request event without a resolvable request id, dropping");
        return Ok(Outcome::Skipped);
    };

    let now = Utc::now();
    let name = event_name.to_lowercase();
    let mut record = store
        .find_request(external_id)
        .await?
        .unwrap_or_else(|| RequestRecord::new(external_id, now));

    if let Some(status) = status_from_name(&name) {
        record.status = status;
    }
    if name.contains("assign") || name.contains("asign") {
        record.provider_assigned = true;
    }

    if let Some(requester_id) = payload.id(REQUESTER_KEYS) {
        record.requester_id = Some(requester_id);
    }
    if let Some(provider_id) = payload.id(PROVIDER_KEYS) {
        record.provider_id = Some(provider_id);
        record.provider_assigned = true;
    }
    if let Some(skill_id) = payload.id(SKILL_KEYS) {
        record.skill_id = Some(skill_id);
    }
    // Only take the flag when a producer actually sent it; its absence is
    // not a claim that the request stopped being critical.
    if payload.first(CRITICAL_KEYS).is_some() {
        record.is_critical = payload.flag(CRITICAL_KEYS);
    }

    if let Some(zone) = resolve_zone(store, payload, record.provider_id).await? {
        record.zone_name = Some(zone);
    }
    record.updated_at = now;

    store.save_request(record).await?;
    Ok(Outcome::Applied)
}

fn status_from_name(name: &str) -> Option<RequestStatus> {
    if name.contains("cancel") {
        Some(RequestStatus::Cancelled)
    } else if name.contains("accept") || name.contains("finaliz") {
        Some(RequestStatus::Accepted)
    } else if name.contains("reject") {
        Some(RequestStatus::Rejected)
    } else if name.contains("creat") || name.contains("requested") {
        // Deliberately narrow: nearly every request event name contains
        // "request", and a sub-event like provider assignment makes no
        // status claim.
        Some(RequestStatus::Created)
    } else {
        None
    }
}

/// Resolve the request's zone: free text from the payload normalized against
/// the zone catalog, falling back to the raw string on a catalog miss, and
/// finally inferred from the provider's own active zone when the event
/// carries none.
async fn resolve_zone<S: NormalizedStore>(
    store: &S,
    payload: &EventPayload<'_>,
    provider_id: Option<i64>,
) -> EventResult<Option<String>> {
    let raw = ADDRESS_KEYS
        .iter()
        .find_map(|key| payload.object(key))
        .and_then(|address| address.text(ZONE_KEYS))
        .or_else(|| payload.text(ZONE_KEYS));

    if let Some(raw) = raw {
        return match store.find_zone_by_name(&raw).await? {
            Some(entry) => Ok(Some(entry.name)),
            None => {
                warn!(zone = %raw, "zone not in catalog, keeping verbatim");
                Ok(Some(raw))
            }
        };
    }

    if let Some(provider_id) = provider_id {
        if let Some(association) = store.find_active_zone_for_provider(provider_id).await? {
            debug!(provider_id, zone = %association.zone_name, "zone inferred from provider");
            return Ok(Some(association.zone_name));
        }
    }

    Ok(None)
}
