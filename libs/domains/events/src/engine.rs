//! Reconciliation engine: classify, dispatch, isolate failures.

use std::sync::Arc;

use tracing::{error, warn};

use crate::classifier::{classify, EventClass};
use crate::error::EventResult;
use crate::handlers;
use crate::models::RawEvent;
use crate::payload::EventPayload;
use crate::repository::NormalizedStore;

/// What happened to a single raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A handler merged the event into normalized state.
    Applied,
    /// Deliberately dropped: unclassified, unresolvable id, or inert by
    /// design. Not an error.
    Skipped,
    /// A handler failed; the event may succeed on a later replay.
    Failed,
}

/// Orchestrates normalization of raw events against an injected store.
pub struct NormalizationEngine<S: NormalizedStore> {
    store: Arc<S>,
}

impl<S: NormalizedStore> NormalizationEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Normalize one raw event. Never propagates handler failures: any error
    /// is logged with the event id and reported as [`Outcome::Failed`], so
    /// one malformed event cannot abort a multi-thousand-event backfill.
    pub async fn normalize_event(&self, event: &RawEvent) -> Outcome {
        match self.try_normalize(event).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(event_id = event.id, error = %err, "event normalization failed");
                Outcome::Failed
            }
        }
    }

    async fn try_normalize(&self, event: &RawEvent) -> EventResult<Outcome> {
        let payload = EventPayload::from_body(&event.body);
        let store = self.store.as_ref();

        match classify(&event.category, &event.name) {
            Some(EventClass::Payment) => handlers::payment::apply(store, &event.name, &payload).await,
            Some(EventClass::User) => handlers::user::apply(store, &event.name, &payload).await,
            Some(EventClass::QuoteAcceptance) => {
                handlers::quote::apply(store, &event.name, &payload).await
            }
            Some(EventClass::Request) => handlers::request::apply(store, &event.name, &payload).await,
            Some(EventClass::Provider) => {
                handlers::provider::apply(store, &event.name, &payload).await
            }
            Some(EventClass::Category) => {
                handlers::category::apply(store, &event.name, &payload).await
            }
            Some(EventClass::Zone) => handlers::zone::apply(store, &event.name, &payload).await,
            None => {
                warn!(
                    event_id = event.id,
                    category = %event.category,
                    name = %event.name,
                    "unclassified event dropped"
                );
                metrics::counter!("normalization_unmatched_total").increment(1);
                Ok(Outcome::Skipped)
            }
        }
    }
}
