//! Area-check server binary.
//!
//! Validates candidate points against a fixed region and accumulates
//! per-session check history.
//!
//! # Usage
//!
//! ```bash
//! # With config file
//! areacheck --config config.yaml
//!
//! # With environment variables only
//! AREACHECK_SERVER__PORT=9090 areacheck
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, Level};

use areacheck_api::http::{create_router, AppState};
use areacheck_api::observability::{init_logging, LoggingConfig};
use areacheck_domain::{QuadrantRegion, Region};
use areacheck_server::ServerConfig;
use areacheck_storage::MemoryHistoryStore;

/// Area-check server: point validation with per-session history.
#[derive(Parser, Debug)]
#[command(name = "areacheck")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = if let Some(config_path) = args.config {
        ServerConfig::load(&config_path)?
    } else {
        ServerConfig::from_env()?
    };

    init_logging(LoggingConfig {
        json_format: config.logging.json,
        default_level: parse_log_level(&config.logging.level),
    });

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting area-check server"
    );

    let scales = config.scale_table()?;
    info!(
        legal_scales = ?config.scales.values,
        tolerance = config.scales.tolerance,
        "Scale table loaded"
    );

    let storage = MemoryHistoryStore::new_shared();
    let region: Arc<dyn Region> = Arc::new(QuadrantRegion);
    let state = AppState::new(storage, region, scales);

    let router = create_router(state).layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, "HTTP server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Parse log level from string.
fn parse_log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
