//! Entity normalization handlers, one per target entity.
//!
//! Each handler owns the reconciliation rules for its entity: it reads the
//! current row (if any), merges the event's claims under the entity's
//! monotonicity rules, and writes back via an idempotent upsert. Handlers
//! return `Ok(Outcome::Skipped)` for events they deliberately drop; only
//! persistence failures surface as errors.

pub mod category;
pub mod payment;
pub mod provider;
pub mod quote;
pub mod request;
pub mod user;
pub mod zone;
