use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::EventResult;
use crate::models::{
    CategoryRecord, NewRawEvent, PaymentRecord, ProviderRecord, RawEvent, RequestRecord,
    SkillAssociation, UserRecord, ZoneAssociation, ZoneEntry,
};

/// Which raw events a replay pass visits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReplayFilter {
    /// Every raw event, oldest first.
    All,
    /// Raw events received at or after the given timestamp.
    From(DateTime<Utc>),
    /// Only events not yet marked processed.
    Unprocessed,
}

/// Data access for the normalized entity tables.
///
/// Handlers read current state and conditionally write it back; all writes
/// go through upsert-by-external-id. The store is constructed explicitly and
/// injected into the engine, never reached through global state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NormalizedStore: Send + Sync {
    async fn find_user(&self, external_id: i64) -> EventResult<Option<UserRecord>>;
    async fn save_user(&self, record: UserRecord) -> EventResult<()>;

    async fn find_request(&self, external_id: i64) -> EventResult<Option<RequestRecord>>;
    async fn save_request(&self, record: RequestRecord) -> EventResult<()>;

    async fn find_payment(&self, external_id: i64) -> EventResult<Option<PaymentRecord>>;
    /// Any payment (real or placeholder) recorded for the request; when both
    /// could exist implementations return the lowest external id, which puts
    /// real ids before the placeholder range.
    async fn find_payment_by_request(&self, request_id: i64)
        -> EventResult<Option<PaymentRecord>>;
    async fn save_payment(&self, record: PaymentRecord) -> EventResult<()>;
    /// Returns true when a row was actually deleted.
    async fn delete_payment(&self, external_id: i64) -> EventResult<bool>;

    async fn find_provider(&self, external_id: i64) -> EventResult<Option<ProviderRecord>>;
    async fn save_provider(&self, record: ProviderRecord) -> EventResult<()>;
    async fn save_skill(&self, association: SkillAssociation) -> EventResult<()>;
    async fn save_provider_zone(&self, association: ZoneAssociation) -> EventResult<()>;
    async fn find_active_zone_for_provider(
        &self,
        provider_id: i64,
    ) -> EventResult<Option<ZoneAssociation>>;

    async fn find_category(&self, external_id: i64) -> EventResult<Option<CategoryRecord>>;
    async fn save_category(&self, record: CategoryRecord) -> EventResult<()>;
    /// Hard delete; categories are the only entity permitting it.
    async fn delete_category(&self, external_id: i64) -> EventResult<bool>;

    /// Case-insensitive exact match against the zone catalog (active only).
    async fn find_zone_by_name(&self, name: &str) -> EventResult<Option<ZoneEntry>>;
}

/// Data access for the append-only raw event store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RawEventRepository: Send + Sync {
    async fn append(&self, event: NewRawEvent) -> EventResult<RawEvent>;

    /// Fetch one page of raw events matching the filter, ordered oldest-first.
    async fn fetch_page(
        &self,
        filter: ReplayFilter,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<RawEvent>>;

    async fn count(&self, filter: ReplayFilter) -> EventResult<u64>;

    async fn mark_processed(&self, id: i64) -> EventResult<()>;
}
