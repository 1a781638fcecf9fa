//! SeaORM entities for the normalized tables and the raw event store.

pub mod category;
pub mod payment;
pub mod provider;
pub mod provider_skill;
pub mod provider_zone;
pub mod raw_event;
pub mod request;
pub mod user;
pub mod zone;
