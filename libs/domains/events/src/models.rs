use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Placeholder payments live in a numeric range disjoint from any real
/// producer-assigned payment id: `request_id + PLACEHOLDER_ID_OFFSET`.
pub const PLACEHOLDER_ID_OFFSET: i64 = 1_000_000_000;

/// Currency assumed when a payment event carries none.
pub const DEFAULT_CURRENCY: &str = "ARS";

/// User lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "deactivated")]
    Deactivated,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Service request lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "request_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    #[sea_orm(string_value = "created")]
    Created,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Payment lifecycle status
///
/// Every status except `Pending` is terminal: once a payment reaches one of
/// them, no later event may move it back to pending.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "expired")]
    Expired,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }

    /// Map a producer status tag onto the five-state enum.
    ///
    /// Producers disagree on language and vocabulary, so both English and
    /// Spanish tags are accepted.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "approved" | "aprobado" | "accredited" | "acreditado" => Some(Self::Approved),
            "rejected" | "rechazado" => Some(Self::Rejected),
            "expired" | "expirado" | "vencido" => Some(Self::Expired),
            "refunded" | "reembolsado" | "devuelto" => Some(Self::Refunded),
            "pending" | "pendiente" | "created" | "in_process" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Provider lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "provider_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "deactivated")]
    Deactivated,
}

/// Normalized user, keyed by the producer-assigned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub external_id: i64,
    pub role_tag: Option<String>,
    pub status: UserStatus,
    pub location: Option<String>,
    pub deactivated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(external_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            external_id,
            role_tag: None,
            status: UserStatus::Active,
            location: None,
            deactivated_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Normalized service request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub external_id: i64,
    pub requester_id: Option<i64>,
    pub provider_id: Option<i64>,
    pub skill_id: Option<i64>,
    pub status: RequestStatus,
    pub zone_name: Option<String>,
    pub is_critical: bool,
    pub provider_assigned: bool,
    /// Stamped by the quote-acceptance handler; the authoritative signal for
    /// matching-latency metrics downstream.
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RequestRecord {
    pub fn new(external_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            external_id,
            requester_id: None,
            provider_id: None,
            skill_id: None,
            status: RequestStatus::Created,
            zone_name: None,
            is_critical: false,
            provider_assigned: false,
            confirmed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Normalized payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub external_id: i64,
    pub payer_id: Option<i64>,
    pub provider_id: Option<i64>,
    pub request_id: Option<i64>,
    pub amount: f64,
    pub currency: String,
    pub method: Option<String>,
    pub status: PaymentStatus,
    pub captured_at: Option<DateTime<Utc>>,
    pub refund_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentRecord {
    pub fn new(external_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            external_id,
            payer_id: None,
            provider_id: None,
            request_id: None,
            amount: 0.0,
            currency: DEFAULT_CURRENCY.to_string(),
            method: None,
            status: PaymentStatus::Pending,
            captured_at: None,
            refund_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this row is a provisional placeholder created from a matching
    /// producer's intent-to-pay signal.
    pub fn is_placeholder(&self) -> bool {
        self.external_id >= PLACEHOLDER_ID_OFFSET
    }
}

/// Normalized provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub external_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: ProviderStatus,
    pub profile_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProviderRecord {
    pub fn new(external_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            external_id,
            first_name: None,
            last_name: None,
            status: ProviderStatus::Active,
            profile_complete: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Skill offered by a provider, upserted from arrays embedded in provider events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAssociation {
    pub provider_id: i64,
    pub skill_id: i64,
    pub skill_name: String,
    pub category_id: Option<i64>,
    pub active: bool,
}

/// Zone covered by a provider, upserted from arrays embedded in provider events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAssociation {
    pub provider_id: i64,
    pub zone_id: i64,
    pub zone_name: String,
    pub active: bool,
}

/// Reference catalog category ("rubro"); the only entity with hard delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub external_id: i64,
    pub name: String,
}

/// Zone catalog entry used to normalize free-text zones on requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEntry {
    pub external_id: i64,
    pub name: String,
    pub active: bool,
}

/// Inbound event as persisted by the bus bridge (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub body: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
    pub message_id: Option<Uuid>,
    pub correlation_id: Option<String>,
    pub source: Option<String>,
    pub processed: bool,
}

/// Inbound event prior to insertion
#[derive(Debug, Clone, Deserialize)]
pub struct NewRawEvent {
    pub category: String,
    pub name: String,
    pub body: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub message_id: Option<Uuid>,
    #[serde(default)]
    pub correlation_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}
