use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the provider_zones table (composite key)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_zones")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub provider_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub zone_id: i64,
    pub zone_name: String,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ZoneAssociation {
    fn from(model: Model) -> Self {
        Self {
            provider_id: model.provider_id,
            zone_id: model.zone_id,
            zone_name: model.zone_name,
            active: model.active,
        }
    }
}

impl From<crate::models::ZoneAssociation> for ActiveModel {
    fn from(association: crate::models::ZoneAssociation) -> Self {
        ActiveModel {
            provider_id: Set(association.provider_id),
            zone_id: Set(association.zone_id),
            zone_name: Set(association.zone_name),
            active: Set(association.active),
        }
    }
}
