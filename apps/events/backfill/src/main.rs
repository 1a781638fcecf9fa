//! Backfill CLI - Entry Point
//!
//! Replays historical raw events through the normalization engine:
//! full backfill, date-bounded backfill, or unprocessed-only backfill.

mod config;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use config::Config;
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_events::{
    NormalizationEngine, PgNormalizedStore, PgRawEventRepository, ReplayService, ReplaySummary,
};
use eyre::{Result, WrapErr};
use tracing::info;

#[derive(Parser)]
#[command(name = "events-backfill", about = "Replay raw events into the normalized model")]
struct Cli {
    /// Events per page; overrides BATCH_SIZE
    #[arg(long, global = true)]
    batch_size: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay every raw event, oldest first
    All,
    /// Replay raw events received at or after the given timestamp
    From {
        /// RFC 3339 timestamp, e.g. 2026-01-01T00:00:00Z
        #[arg(value_parser = clap::value_parser!(DateTime<Utc>))]
        from: DateTime<Utc>,
    },
    /// Replay only unprocessed events, marking each processed on success
    Unprocessed,
}

#[tokio::main]
async fn main() -> Result<()> {
    core_config::tracing::install_color_eyre();

    let cli = Cli::parse();
    let config = Config::from_env().wrap_err("Failed to load configuration")?;
    core_config::tracing::init_tracing(&config.environment);
    observability::init_metrics();

    info!(environment = ?config.environment, "Starting events backfill");

    let db = connect_from_config_with_retry(config.database, None)
        .await
        .wrap_err("Failed to connect to PostgreSQL")?;
    run_migrations::<migration::Migrator>(&db, "events-backfill")
        .await
        .wrap_err("Failed to run migrations")?;

    let engine = NormalizationEngine::new(PgNormalizedStore::new(db.clone()));
    let batch_size = cli.batch_size.unwrap_or(config.batch_size);
    let replay = ReplayService::new(engine, PgRawEventRepository::new(db))
        .with_batch_size(batch_size);

    let summary: ReplaySummary = match cli.command {
        Commands::All => replay.replay_all().await?,
        Commands::From { from } => replay.replay_from(from).await?,
        Commands::Unprocessed => replay.replay_unprocessed().await?,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
