//! Events Domain
//!
//! Normalizes heterogeneous business events (user, payment, request,
//! provider, category, zone lifecycle events) emitted by multiple upstream
//! producers into a relational model used for analytics.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Replay    │  ← batched backfill over the raw event store
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │    Engine    │  ← classify, dispatch, isolate per-event failures
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   Handlers   │  ← per-entity reconciliation rules (payment state
//! └──────┬───────┘    machine, request zone resolution, ...)
//!        │
//! ┌──────▼───────┐
//! │  Repository  │  ← data access (trait + Postgres implementation)
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │    Models    │  ← normalized records, status enums, raw events
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{
//!     engine::NormalizationEngine,
//!     postgres::{PgNormalizedStore, PgRawEventRepository},
//!     replay::ReplayService,
//! };
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let engine = NormalizationEngine::new(PgNormalizedStore::new(db.clone()));
//! let replay = ReplayService::new(engine, PgRawEventRepository::new(db));
//!
//! let summary = replay.replay_unprocessed().await?;
//! println!("processed {} of {}", summary.processed, summary.total);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod coerce;
pub mod engine;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod payload;
pub mod postgres;
pub mod replay;
pub mod repository;

// Re-export commonly used types
pub use classifier::{classify, EventClass};
pub use coerce::{ExternalId, IdParseError};
pub use engine::{NormalizationEngine, Outcome};
pub use error::{EventError, EventResult};
pub use models::{
    CategoryRecord, NewRawEvent, PaymentRecord, PaymentStatus, ProviderRecord, ProviderStatus,
    RawEvent, RequestRecord, RequestStatus, SkillAssociation, UserRecord, UserStatus,
    ZoneAssociation, ZoneEntry, DEFAULT_CURRENCY, PLACEHOLDER_ID_OFFSET,
};
pub use payload::{EventBody, EventPayload};
pub use postgres::{PgNormalizedStore, PgRawEventRepository};
pub use replay::{ReplayService, ReplaySummary, DEFAULT_BATCH_SIZE};
pub use repository::{NormalizedStore, RawEventRepository, ReplayFilter};
