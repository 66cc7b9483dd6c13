//! FTV Server
//!
//! Scans the configured roots once, then serves the timeline API.
//!
//! Run with: cargo run --bin ftv -- --root /cases/extract/Data --root /cases/extract/System
//!
//! # Configuration
//!
//! Settings come from `--config` (or the default config locations), then
//! environment variables, then command-line flags:
//! - `FTV_ROOTS`: Root directories (platform path list)
//! - `FTV_ON_ROOT_ERROR`: `abort` or `skip`
//! - `FTV_API_HOST` / `FTV_API_PORT`: Bind address
//! - `FTV_LOG_LEVEL` / `FTV_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full tracing filter (overrides the log level)

use clap::Parser;
use ftv::api::{serve, AppState};
use ftv::config::{Config, LoggingConfig};
use ftv::storage::{EventStore, StoreError};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ftv")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Forensic file timeline server")]
struct Args {
    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root directory to scan (repeatable, replaces configured roots)
    #[arg(short, long = "root")]
    roots: Vec<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if !args.roots.is_empty() {
        config.scan.roots = args.roots;
    }
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    init_logging(&config.logging);

    tracing::info!("Starting FTV server v{}", env!("CARGO_PKG_VERSION"));

    if config.scan.roots.is_empty() {
        return Err(StoreError::NoRoots.into());
    }

    // Build the store before accepting requests
    let roots = config.scan.roots.clone();
    let policy = config.scan.on_root_error;
    let store =
        tokio::task::spawn_blocking(move || EventStore::build_with_policy(&roots, policy)).await??;

    if !store.skipped().is_empty() {
        tracing::warn!("{} files could not be read and were excluded", store.skipped().len());
    }

    let state = AppState::new(store, config.scan.clone(), config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("FTV server stopped");
    Ok(())
}

/// Install the tracing subscriber
fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("ftv={},tower_http=info", config.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
