use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the categories table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub external_id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::CategoryRecord {
    fn from(model: Model) -> Self {
        Self {
            external_id: model.external_id,
            name: model.name,
        }
    }
}

impl From<crate::models::CategoryRecord> for ActiveModel {
    fn from(record: crate::models::CategoryRecord) -> Self {
        ActiveModel {
            external_id: Set(record.external_id),
            name: Set(record.name),
        }
    }
}
