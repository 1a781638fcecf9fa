use crate::models::ProviderStatus;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the providers table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "providers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub external_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: ProviderStatus,
    pub profile_complete: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ProviderRecord {
    fn from(model: Model) -> Self {
        Self {
            external_id: model.external_id,
            first_name: model.first_name,
            last_name: model.last_name,
            status: model.status,
            profile_complete: model.profile_complete,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::ProviderRecord> for ActiveModel {
    fn from(record: crate::models::ProviderRecord) -> Self {
        ActiveModel {
            external_id: Set(record.external_id),
            first_name: Set(record.first_name),
            last_name: Set(record.last_name),
            status: Set(record.status),
            profile_complete: Set(record.profile_complete),
            created_at: Set(record.created_at.into()),
            updated_at: Set(record.updated_at.into()),
        }
    }
}
