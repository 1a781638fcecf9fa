//! Environment-driven configuration for the backfill binary.

use core_config::{env_or_default, ConfigError, Environment, FromEnv};
use database::postgres::PostgresConfig;
use domain_events::DEFAULT_BATCH_SIZE;

pub struct Config {
    pub environment: Environment,
    pub database: PostgresConfig,
    pub batch_size: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let batch_size_raw = env_or_default("BATCH_SIZE", &DEFAULT_BATCH_SIZE.to_string());
        let batch_size = batch_size_raw
            .parse::<u64>()
            .map_err(|err| ConfigError::ParseError {
                key: "BATCH_SIZE".to_string(),
                details: err.to_string(),
            })?;

        Ok(Self {
            environment: Environment::from_env(),
            database: PostgresConfig::from_env()?,
            batch_size,
        })
    }
}
