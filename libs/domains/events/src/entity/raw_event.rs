use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the append-only raw_events table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category: String,
    pub name: String,
    pub body: Json,
    pub occurred_at: DateTimeWithTimeZone,
    pub message_id: Option<Uuid>,
    pub correlation_id: Option<String>,
    pub source: Option<String>,
    pub processed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::RawEvent {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            category: model.category,
            name: model.name,
            body: model.body,
            occurred_at: model.occurred_at.into(),
            message_id: model.message_id,
            correlation_id: model.correlation_id,
            source: model.source,
            processed: model.processed,
        }
    }
}

impl From<crate::models::NewRawEvent> for ActiveModel {
    fn from(event: crate::models::NewRawEvent) -> Self {
        ActiveModel {
            id: NotSet,
            category: Set(event.category),
            name: Set(event.name),
            body: Set(event.body),
            occurred_at: Set(event.occurred_at.into()),
            message_id: Set(event.message_id),
            correlation_id: Set(event.correlation_id),
            source: Set(event.source),
            processed: Set(false),
        }
    }
}
