//! Health dashboard nightly job
//!
//! Reads the daily metrics export, rescores readiness for every user in the
//! recompute window and writes one JSON record per user-day to stdout.
//!
//! Usage:
//!   healthdash-jobs                 run the recompute
//!   healthdash-jobs --print-config  print the effective configuration

use anyhow::Result;
use healthdash_jobs::config::JobsConfig;
use healthdash_jobs::services::RecomputeService;
use healthdash_jobs::{io, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    telemetry::init_tracing();

    let config = JobsConfig::load()?;

    if std::env::args().skip(1).any(|arg| arg == "--print-config") {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if JobsConfig::is_production() { "production" } else { "development" },
        input = %config.input.daily_metrics_path,
        "Starting readiness recompute"
    );

    let rows = io::read_daily_metrics_file(&config.input.daily_metrics_path)?;
    let records = RecomputeService::recompute_all(rows, config.recompute).await?;

    io::write_json_lines(std::io::stdout().lock(), &records)?;

    info!(records = records.len(), "Recompute complete");
    Ok(())
}
