use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the zones catalog table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "zones")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub external_id: i64,
    pub name: String,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ZoneEntry {
    fn from(model: Model) -> Self {
        Self {
            external_id: model.external_id,
            name: model.name,
            active: model.active,
        }
    }
}

impl From<crate::models::ZoneEntry> for ActiveModel {
    fn from(entry: crate::models::ZoneEntry) -> Self {
        ActiveModel {
            external_id: Set(entry.external_id),
            name: Set(entry.name),
            active: Set(entry.active),
        }
    }
}
