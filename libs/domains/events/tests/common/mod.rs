//! In-memory repository doubles shared by the integration tests.
//!
//! Normalization logic only ever touches the store through the repository
//! traits, so a HashMap-backed store exercises the same reconciliation paths
//! as Postgres while keeping the suite hermetic.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_events::{
    CategoryRecord, EventError, EventResult, NewRawEvent, NormalizedStore, PaymentRecord,
    ProviderRecord, RawEvent, RawEventRepository, ReplayFilter, RequestRecord, SkillAssociation,
    UserRecord, ZoneAssociation, ZoneEntry,
};
use serde_json::Value;

#[derive(Default)]
pub struct MemoryStore {
    pub users: Mutex<HashMap<i64, UserRecord>>,
    pub requests: Mutex<HashMap<i64, RequestRecord>>,
    pub payments: Mutex<HashMap<i64, PaymentRecord>>,
    pub providers: Mutex<HashMap<i64, ProviderRecord>>,
    pub skills: Mutex<HashMap<(i64, i64), SkillAssociation>>,
    pub provider_zones: Mutex<HashMap<(i64, i64), ZoneAssociation>>,
    pub categories: Mutex<HashMap<i64, CategoryRecord>>,
    pub zones: Mutex<HashMap<i64, ZoneEntry>>,
    /// User ids whose writes fail, to exercise error isolation.
    pub poisoned_users: Mutex<HashSet<i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poison_user(&self, external_id: i64) {
        self.poisoned_users.lock().unwrap().insert(external_id);
    }

    pub fn seed_zone(&self, external_id: i64, name: &str, active: bool) {
        self.zones.lock().unwrap().insert(
            external_id,
            ZoneEntry {
                external_id,
                name: name.to_string(),
                active,
            },
        );
    }
}

#[async_trait]
impl NormalizedStore for MemoryStore {
    async fn find_user(&self, external_id: i64) -> EventResult<Option<UserRecord>> {
        Ok(self.users.lock().unwrap().get(&external_id).cloned())
    }

    async fn save_user(&self, record: UserRecord) -> EventResult<()> {
        if self
            .poisoned_users
            .lock()
            .unwrap()
            .contains(&record.external_id)
        {
            return Err(EventError::Database("simulated write failure".to_string()));
        }
        self.users.lock().unwrap().insert(record.external_id, record);
        Ok(())
    }

    async fn find_request(&self, external_id: i64) -> EventResult<Option<RequestRecord>> {
        Ok(self.requests.lock().unwrap().get(&external_id).cloned())
    }

    async fn save_request(&self, record: RequestRecord) -> EventResult<()> {
        self.requests
            .lock()
            .unwrap()
            .insert(record.external_id, record);
        Ok(())
    }

    async fn find_payment(&self, external_id: i64) -> EventResult<Option<PaymentRecord>> {
        Ok(self.payments.lock().unwrap().get(&external_id).cloned())
    }

    async fn find_payment_by_request(
        &self,
        request_id: i64,
    ) -> EventResult<Option<PaymentRecord>> {
        let payments = self.payments.lock().unwrap();
        let mut matching: Vec<&PaymentRecord> = payments
            .values()
            .filter(|payment| payment.request_id == Some(request_id))
            .collect();
        matching.sort_by_key(|payment| payment.external_id);
        Ok(matching.first().map(|payment| (*payment).clone()))
    }

    async fn save_payment(&self, record: PaymentRecord) -> EventResult<()> {
        self.payments
            .lock()
            .unwrap()
            .insert(record.external_id, record);
        Ok(())
    }

    async fn delete_payment(&self, external_id: i64) -> EventResult<bool> {
        Ok(self.payments.lock().unwrap().remove(&external_id).is_some())
    }

    async fn find_provider(&self, external_id: i64) -> EventResult<Option<ProviderRecord>> {
        Ok(self.providers.lock().unwrap().get(&external_id).cloned())
    }

    async fn save_provider(&self, record: ProviderRecord) -> EventResult<()> {
        self.providers
            .lock()
            .unwrap()
            .insert(record.external_id, record);
        Ok(())
    }

    async fn save_skill(&self, association: SkillAssociation) -> EventResult<()> {
        self.skills
            .lock()
            .unwrap()
            .insert((association.provider_id, association.skill_id), association);
        Ok(())
    }

    async fn save_provider_zone(&self, association: ZoneAssociation) -> EventResult<()> {
        self.provider_zones
            .lock()
            .unwrap()
            .insert((association.provider_id, association.zone_id), association);
        Ok(())
    }

    async fn find_active_zone_for_provider(
        &self,
        provider_id: i64,
    ) -> EventResult<Option<ZoneAssociation>> {
        let zones = self.provider_zones.lock().unwrap();
        let mut matching: Vec<&ZoneAssociation> = zones
            .values()
            .filter(|zone| zone.provider_id == provider_id && zone.active)
            .collect();
        matching.sort_by_key(|zone| zone.zone_id);
        Ok(matching.first().map(|zone| (*zone).clone()))
    }

    async fn find_category(&self, external_id: i64) -> EventResult<Option<CategoryRecord>> {
        Ok(self.categories.lock().unwrap().get(&external_id).cloned())
    }

    async fn save_category(&self, record: CategoryRecord) -> EventResult<()> {
        self.categories
            .lock()
            .unwrap()
            .insert(record.external_id, record);
        Ok(())
    }

    async fn delete_category(&self, external_id: i64) -> EventResult<bool> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .remove(&external_id)
            .is_some())
    }

    async fn find_zone_by_name(&self, name: &str) -> EventResult<Option<ZoneEntry>> {
        let needle = name.trim().to_lowercase();
        Ok(self
            .zones
            .lock()
            .unwrap()
            .values()
            .find(|zone| zone.active && zone.name.to_lowercase() == needle)
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryRawEvents {
    pub events: Mutex<Vec<RawEvent>>,
    /// Event ids whose processed-flag update fails.
    pub poisoned_marks: Mutex<HashSet<i64>>,
}

impl MemoryRawEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poison_mark(&self, id: i64) {
        self.poisoned_marks.lock().unwrap().insert(id);
    }

    pub fn seed(&self, events: Vec<RawEvent>) {
        let mut guard = self.events.lock().unwrap();
        *guard = events;
        guard.sort_by_key(|event| (event.occurred_at, event.id));
    }

    pub fn processed_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.processed)
            .map(|event| event.id)
            .collect();
        ids.sort();
        ids
    }

    fn matches(event: &RawEvent, filter: ReplayFilter) -> bool {
        match filter {
            ReplayFilter::All => true,
            ReplayFilter::From(since) => event.occurred_at >= since,
            ReplayFilter::Unprocessed => !event.processed,
        }
    }
}

#[async_trait]
impl RawEventRepository for MemoryRawEvents {
    async fn append(&self, event: NewRawEvent) -> EventResult<RawEvent> {
        let mut guard = self.events.lock().unwrap();
        let id = guard.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let stored = RawEvent {
            id,
            category: event.category,
            name: event.name,
            body: event.body,
            occurred_at: event.occurred_at,
            message_id: event.message_id,
            correlation_id: event.correlation_id,
            source: event.source,
            processed: false,
        };
        guard.push(stored.clone());
        guard.sort_by_key(|event| (event.occurred_at, event.id));
        Ok(stored)
    }

    async fn fetch_page(
        &self,
        filter: ReplayFilter,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<RawEvent>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| Self::matches(event, filter))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: ReplayFilter) -> EventResult<u64> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| Self::matches(event, filter))
            .count() as u64)
    }

    async fn mark_processed(&self, id: i64) -> EventResult<()> {
        if self.poisoned_marks.lock().unwrap().contains(&id) {
            return Err(EventError::Database("simulated mark failure".to_string()));
        }
        let mut guard = self.events.lock().unwrap();
        if let Some(event) = guard.iter_mut().find(|event| event.id == id) {
            event.processed = true;
        }
        Ok(())
    }
}

/// Build a raw event with a fixed receive time derived from its id, so
/// ordering in tests is deterministic.
pub fn raw_event(id: i64, category: &str, name: &str, body: Value) -> RawEvent {
    let base: DateTime<Utc> = "2026-01-01T00:00:00Z".parse().unwrap();
    RawEvent {
        id,
        category: category.to_string(),
        name: name.to_string(),
        body,
        occurred_at: base + chrono::Duration::seconds(id),
        message_id: None,
        correlation_id: None,
        source: Some("test".to_string()),
        processed: false,
    }
}
