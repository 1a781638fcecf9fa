use crate::models::PaymentStatus;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the payments table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub external_id: i64,
    pub payer_id: Option<i64>,
    pub provider_id: Option<i64>,
    pub request_id: Option<i64>,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub currency: String,
    pub method: Option<String>,
    pub status: PaymentStatus,
    pub captured_at: Option<DateTimeWithTimeZone>,
    pub refund_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::PaymentRecord {
    fn from(model: Model) -> Self {
        Self {
            external_id: model.external_id,
            payer_id: model.payer_id,
            provider_id: model.provider_id,
            request_id: model.request_id,
            amount: model.amount,
            currency: model.currency,
            method: model.method,
            status: model.status,
            captured_at: model.captured_at.map(Into::into),
            refund_id: model.refund_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::PaymentRecord> for ActiveModel {
    fn from(record: crate::models::PaymentRecord) -> Self {
        ActiveModel {
            external_id: Set(record.external_id),
            payer_id: Set(record.payer_id),
            provider_id: Set(record.provider_id),
            request_id: Set(record.request_id),
            amount: Set(record.amount),
            currency: Set(record.currency),
            method: Set(record.method),
            status: Set(record.status),
            captured_at: Set(record.captured_at.map(Into::into)),
            refund_id: Set(record.refund_id),
            created_at: Set(record.created_at.into()),
            updated_at: Set(record.updated_at.into()),
        }
    }
}
