use crate::models::RequestStatus;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the requests table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub external_id: i64,
    pub requester_id: Option<i64>,
    pub provider_id: Option<i64>,
    pub skill_id: Option<i64>,
    pub status: RequestStatus,
    pub zone_name: Option<String>,
    pub is_critical: bool,
    pub provider_assigned: bool,
    pub confirmed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::RequestRecord {
    fn from(model: Model) -> Self {
        Self {
            external_id: model.external_id,
            requester_id: model.requester_id,
            provider_id: model.provider_id,
            skill_id: model.skill_id,
            status: model.status,
            zone_name: model.zone_name,
            is_critical: model.is_critical,
            provider_assigned: model.provider_assigned,
            confirmed_at: model.confirmed_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::RequestRecord> for ActiveModel {
    fn from(record: crate::models::RequestRecord) -> Self {
        ActiveModel {
            external_id: Set(record.external_id),
            requester_id: Set(record.requester_id),
            provider_id: Set(record.provider_id),
            skill_id: Set(record.skill_id),
            status: Set(record.status),
            zone_name: Set(record.zone_name),
            is_critical: Set(record.is_critical),
            provider_assigned: Set(record.provider_assigned),
            confirmed_at: Set(record.confirmed_at.map(Into::into)),
            created_at: Set(record.created_at.into()),
            updated_at: Set(record.updated_at.into()),
        }
    }
}
