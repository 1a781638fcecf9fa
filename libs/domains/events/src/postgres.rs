//! Postgres-backed implementations of the repository traits.
//!
//! All entity writes are idempotent upserts keyed by the producer-assigned
//! external id, so replaying the same raw event converges on the same row.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, ExprTrait, Func, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::{
    category, payment, provider, provider_skill, provider_zone, raw_event, request, user, zone,
};
use crate::error::EventResult;
use crate::models::{
    CategoryRecord, NewRawEvent, PaymentRecord, ProviderRecord, RawEvent, RequestRecord,
    SkillAssociation, UserRecord, ZoneAssociation, ZoneEntry,
};
use crate::repository::{NormalizedStore, RawEventRepository, ReplayFilter};

/// Postgres implementation of [`NormalizedStore`].
#[derive(Clone)]
pub struct PgNormalizedStore {
    db: DatabaseConnection,
}

impl PgNormalizedStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NormalizedStore for PgNormalizedStore {
    async fn find_user(&self, external_id: i64) -> EventResult<Option<UserRecord>> {
        let found = user::Entity::find_by_id(external_id).one(&self.db).await?;
        Ok(found.map(Into::into))
    }

    async fn save_user(&self, record: UserRecord) -> EventResult<()> {
        let model: user::ActiveModel = record.into();
        user::Entity::insert(model)
            .on_conflict(
                OnConflict::column(user::Column::ExternalId)
                    .update_columns([
                        user::Column::RoleTag,
                        user::Column::Status,
                        user::Column::Location,
                        user::Column::DeactivatedAt,
                        user::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn find_request(&self, external_id: i64) -> EventResult<Option<RequestRecord>> {
        let found = request::Entity::find_by_id(external_id)
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn save_request(&self, record: RequestRecord) -> EventResult<()> {
        let model: request::ActiveModel = record.into();
        request::Entity::insert(model)
            .on_conflict(
                OnConflict::column(request::Column::ExternalId)
                    .update_columns([
                        request::Column::RequesterId,
                        request::Column::ProviderId,
                        request::Column::SkillId,
                        request::Column::Status,
                        request::Column::ZoneName,
                        request::Column::IsCritical,
                        request::Column::ProviderAssigned,
                        request::Column::ConfirmedAt,
                        request::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn find_payment(&self, external_id: i64) -> EventResult<Option<PaymentRecord>> {
        let found = payment::Entity::find_by_id(external_id)
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn find_payment_by_request(
        &self,
        request_id: i64,
    ) -> EventResult<Option<PaymentRecord>> {
        // Real producer-assigned ids sort below the placeholder range, so
        // ordering ascending returns the real payment when both rows exist.
        let found = payment::Entity::find()
            .filter(payment::Column::RequestId.eq(request_id))
            .order_by_asc(payment::Column::ExternalId)
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn save_payment(&self, record: PaymentRecord) -> EventResult<()> {
        let model: payment::ActiveModel = record.into();
        payment::Entity::insert(model)
            .on_conflict(
                OnConflict::column(payment::Column::ExternalId)
                    .update_columns([
                        payment::Column::PayerId,
                        payment::Column::ProviderId,
                        payment::Column::RequestId,
                        payment::Column::Amount,
                        payment::Column::Currency,
                        payment::Column::Method,
                        payment::Column::Status,
                        payment::Column::CapturedAt,
                        payment::Column::RefundId,
                        payment::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn delete_payment(&self, external_id: i64) -> EventResult<bool> {
        let result = payment::Entity::delete_by_id(external_id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_provider(&self, external_id: i64) -> EventResult<Option<ProviderRecord>> {
        let found = provider::Entity::find_by_id(external_id)
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn save_provider(&self, record: ProviderRecord) -> EventResult<()> {
        let model: provider::ActiveModel = record.into();
        provider::Entity::insert(model)
            .on_conflict(
                OnConflict::column(provider::Column::ExternalId)
                    .update_columns([
                        provider::Column::FirstName,
                        provider::Column::LastName,
                        provider::Column::Status,
                        provider::Column::ProfileComplete,
                        provider::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn save_skill(&self, association: SkillAssociation) -> EventResult<()> {
        let model: provider_skill::ActiveModel = association.into();
        provider_skill::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    provider_skill::Column::ProviderId,
                    provider_skill::Column::SkillId,
                ])
                .update_columns([
                    provider_skill::Column::SkillName,
                    provider_skill::Column::CategoryId,
                    provider_skill::Column::Active,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn save_provider_zone(&self, association: ZoneAssociation) -> EventResult<()> {
        let model: provider_zone::ActiveModel = association.into();
        provider_zone::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    provider_zone::Column::ProviderId,
                    provider_zone::Column::ZoneId,
                ])
                .update_columns([
                    provider_zone::Column::ZoneName,
                    provider_zone::Column::Active,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn find_active_zone_for_provider(
        &self,
        provider_id: i64,
    ) -> EventResult<Option<ZoneAssociation>> {
        let found = provider_zone::Entity::find()
            .filter(provider_zone::Column::ProviderId.eq(provider_id))
            .filter(provider_zone::Column::Active.eq(true))
            .order_by_asc(provider_zone::Column::ZoneId)
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn find_category(&self, external_id: i64) -> EventResult<Option<CategoryRecord>> {
        let found = category::Entity::find_by_id(external_id)
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn save_category(&self, record: CategoryRecord) -> EventResult<()> {
        let model: category::ActiveModel = record.into();
        category::Entity::insert(model)
            .on_conflict(
                OnConflict::column(category::Column::ExternalId)
                    .update_columns([category::Column::Name])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn delete_category(&self, external_id: i64) -> EventResult<bool> {
        let result = category::Entity::delete_by_id(external_id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_zone_by_name(&self, name: &str) -> EventResult<Option<ZoneEntry>> {
        let needle = name.trim().to_lowercase();
        let found = zone::Entity::find()
            .filter(zone::Column::Active.eq(true))
            .filter(Expr::expr(Func::lower(Expr::col(zone::Column::Name))).eq(needle))
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }
}

/// Postgres implementation of [`RawEventRepository`].
#[derive(Clone)]
pub struct PgRawEventRepository {
    db: DatabaseConnection,
}

impl PgRawEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn apply_filter(
        query: sea_orm::Select<raw_event::Entity>,
        filter: ReplayFilter,
    ) -> sea_orm::Select<raw_event::Entity> {
        match filter {
            ReplayFilter::All => query,
            ReplayFilter::From(since) => query.filter(raw_event::Column::OccurredAt.gte(since)),
            ReplayFilter::Unprocessed => query.filter(raw_event::Column::Processed.eq(false)),
        }
    }
}

#[async_trait]
impl RawEventRepository for PgRawEventRepository {
    async fn append(&self, event: NewRawEvent) -> EventResult<RawEvent> {
        let model: raw_event::ActiveModel = event.into();
        let inserted = raw_event::Entity::insert(model)
            .exec_with_returning(&self.db)
            .await?;
        Ok(inserted.into())
    }

    async fn fetch_page(
        &self,
        filter: ReplayFilter,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<RawEvent>> {
        let rows = Self::apply_filter(raw_event::Entity::find(), filter)
            .order_by_asc(raw_event::Column::OccurredAt)
            .order_by_asc(raw_event::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: ReplayFilter) -> EventResult<u64> {
        let total = Self::apply_filter(raw_event::Entity::find(), filter)
            .count(&self.db)
            .await?;
        Ok(total)
    }

    async fn mark_processed(&self, id: i64) -> EventResult<()> {
        let model = raw_event::ActiveModel {
            id: Set(id),
            processed: Set(true),
            ..Default::default()
        };
        raw_event::Entity::update(model).exec(&self.db).await?;
        Ok(())
    }
}
