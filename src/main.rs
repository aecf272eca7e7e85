//! WearWatch - Extruder Wear Monitoring
//!
//! Maintenance-tracking service for extruder screw and barrel wear across
//! production lines, with trend forecasts and maintenance recommendations.
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (db at ./wearwatch_db, listen on 0.0.0.0:8080)
//! cargo run --release
//!
//! # Seed deterministic demo data and start
//! cargo run --release -- --seed-demo 42 --lines 14
//!
//! # Custom config and address
//! cargo run --release -- --config plant.toml --addr 127.0.0.1:9000
//! ```
//!
//! # Environment Variables
//!
//! - `WEARWATCH_CONFIG`: Path to plant configuration TOML
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use wearwatch::api::{create_app, DashboardState};
use wearwatch::config::PlantConfig;
use wearwatch::demo;
use wearwatch::storage::ArchiveStore;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wearwatch")]
#[command(about = "Extruder wear monitoring and predictive maintenance")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: from config, "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to the plant configuration TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the sled database directory
    #[arg(long, default_value = "wearwatch_db")]
    db: PathBuf,

    /// Wipe all archived sessions and line snapshots on startup.
    /// WARNING: This is destructive and cannot be undone!
    #[arg(long)]
    reset_db: bool,

    /// Seed deterministic demo data with the given RNG seed
    #[arg(long, value_name = "SEED")]
    seed_demo: Option<u64>,

    /// Number of production lines to generate with --seed-demo
    #[arg(long, default_value = "14")]
    lines: u32,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config = PlantConfig::load(args.config.as_deref())
        .context("failed to load plant configuration")?;
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }

    let store = ArchiveStore::open(&args.db)
        .with_context(|| format!("failed to open database at {}", args.db.display()))?;

    if args.reset_db {
        info!("--reset-db: wiping archive and line snapshots");
        store.clear().context("failed to reset database")?;
    }

    if let Some(seed) = args.seed_demo {
        let sessions = demo::seed_demo(&store, &config, seed, args.lines)
            .context("failed to seed demo data")?;
        info!("Demo data ready: {} sessions", sessions);
    }

    info!(
        "WearWatch starting — {} archived sessions, listening on {}",
        store.record_count(),
        config.server.addr
    );

    let addr = config.server.addr.clone();
    let state = DashboardState::new(config, store);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {err}");
            }
            info!("Received shutdown signal");
        })
        .await
        .context("server error")?;

    info!("Graceful shutdown complete");
    Ok(())
}
