//! Block until the configured Postgres database answers `SELECT 1`.
//!
//! Exits 0 once the database is reachable and non-zero after the last failed
//! attempt. The database URL is resolved exactly like the server does.
use anyhow::Context;
use clap::Parser;
use fulcrum::config::FulcrumConfig;
use fulcrum::observability;
use fulcrum::readiness::{self, RetryPolicy};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "wait-for-db")]
#[command(about = "Wait for the Fulcrum database to accept connections")]
struct Args {
    /// Maximum number of connection attempts.
    #[arg(long, default_value_t = readiness::DEFAULT_ATTEMPTS)]
    attempts: u32,

    /// Delay between attempts in milliseconds.
    #[arg(long, default_value_t = readiness::DEFAULT_INTERVAL_MS)]
    interval_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    observability::init_tracing("fulcrum-wait-for-db");

    let config = FulcrumConfig::from_env_or_yaml().context("fulcrum config")?;
    let pg = config
        .postgres
        .context("no database configured (set DATABASE_URL or DB_HOST)")?;
    let policy = RetryPolicy {
        attempts: args.attempts,
        interval: Duration::from_millis(args.interval_ms),
    };
    readiness::wait_for_database(&pg, policy).await?;
    Ok(())
}
