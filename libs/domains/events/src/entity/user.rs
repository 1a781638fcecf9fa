use crate::models::UserStatus;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub external_id: i64,
    pub role_tag: Option<String>,
    pub status: UserStatus,
    pub location: Option<String>,
    pub deactivated_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::UserRecord {
    fn from(model: Model) -> Self {
        Self {
            external_id: model.external_id,
            role_tag: model.role_tag,
            status: model.status,
            location: model.location,
            deactivated_at: model.deactivated_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::UserRecord> for ActiveModel {
    fn from(record: crate::models::UserRecord) -> Self {
        ActiveModel {
            external_id: Set(record.external_id),
            role_tag: Set(record.role_tag),
            status: Set(record.status),
            location: Set(record.location),
            deactivated_at: Set(record.deactivated_at.map(Into::into)),
            created_at: Set(record.created_at.into()),
            updated_at: Set(record.updated_at.into()),
        }
    }
}
