use tracing::debug;

use crate::engine::Outcome;
use crate::error::EventResult;
use crate::payload::EventPayload;
use crate::repository::NormalizedStore;

/// Standalone zone catalog events are deliberately inert: the zone catalog
/// is maintained out of band and provider coverage arrives denormalized on
/// provider events.
pub async fn apply<S: NormalizedStore>(
    _store: &S,
    event_name: &str,
    _payload: &EventPayload<'_>,
) -> EventResult<Outcome> {
    debug!(event_name, "zone catalog event ignored");
    Ok(Outcome::Skipped)
}
