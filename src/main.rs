//! Maintenance daemon: prepares the schema, runs explicit bootstrap seeding,
//! and keeps the reservation-hold sweeper running.

use dotenvy::dotenv;
use quota_service::{config, core, errors::Result};
use std::{env, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database schema is ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Explicit bootstrap seeding, only when a seed file is configured
    if let Ok(path) = env::var("BOOTSTRAP_CONFIG") {
        let bootstrap = config::bootstrap::load_config(&path)
            .inspect_err(|e| error!("Failed to load bootstrap config {}: {}", path, e))?;
        config::bootstrap::seed_initial_campaign(&db, &bootstrap)
            .await
            .inspect_err(|e| error!("Bootstrap seeding failed: {}", e))?;
    } else {
        info!("BOOTSTRAP_CONFIG not set, skipping seeding.");
    }

    // 5. Run the reservation-hold sweeper
    let sweep_interval = env::var("SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);
    info!(sweep_interval, "Starting reservation-hold sweeper.");
    core::sweeper::run_sweeper(db, Duration::from_secs(sweep_interval)).await;

    Ok(())
}
