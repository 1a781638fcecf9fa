use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the provider_skills table (composite key)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_skills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub provider_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub skill_id: i64,
    pub skill_name: String,
    pub category_id: Option<i64>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::SkillAssociation {
    fn from(model: Model) -> Self {
        Self {
            provider_id: model.provider_id,
            skill_id: model.skill_id,
            skill_name: model.skill_name,
            category_id: model.category_id,
            active: model.active,
        }
    }
}

impl From<crate::models::SkillAssociation> for ActiveModel {
    fn from(association: crate::models::SkillAssociation) -> Self {
        ActiveModel {
            provider_id: Set(association.provider_id),
            skill_id: Set(association.skill_id),
            skill_name: Set(association.skill_name),
            category_id: Set(association.category_id),
            active: Set(association.active),
        }
    }
}
