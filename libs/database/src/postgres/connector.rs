use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{retry, retry_with_backoff, RetryConfig};

/// Connect to a PostgreSQL database with default pool settings
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(PostgresConfig::new(database_url)).await
}

/// Connect using a PostgresConfig
///
/// ```ignore
/// use database::postgres::{PostgresConfig, connect_from_config};
/// use core_config::FromEnv;
///
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config(config).await?;
/// ```
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();
    connect_with_options(options).await
}

async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Connect with automatic retry on failure
///
/// Uses exponential backoff with jitter; useful for transient network issues
/// during startup.
pub async fn connect_with_retry(
    database_url: &str,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let url = database_url.to_string();

    match retry_config {
        Some(config) => retry_with_backoff(|| connect(&url), config).await,
        None => retry(|| connect(&url)).await,
    }
}

/// Connect from config with automatic retry on failure
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();

    match retry_config {
        Some(retry_config) => {
            retry_with_backoff(
                || {
                    let opts = options.clone();
                    connect_with_options(opts)
                },
                retry_config,
            )
            .await
        }
        None => {
            retry(|| {
                let opts = options.clone();
                connect_with_options(opts)
            })
            .await
        }
    }
}

/// Run pending migrations for the given migrator
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
