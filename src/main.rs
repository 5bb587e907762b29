//! Edge gateway entrypoint.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──▶ request ID ──▶ trace ──▶ timeout ──▶ edge pipeline ──────────────▶ upstream
//!                                              │ classify (public?)             app
//!                                              │ auth gate (protected only)
//!                                              │ locale resolver
//!     Client Response                          ▼
//!     ◀── request ID ◀── trace ◀────────── composer (Set-Cookie) ◀───────── response
//! ```
//!
//! Configuration comes from `--config <file>` or `EDGE_GATE_CONFIG`; with
//! neither, built-in defaults are used.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_gate::config::{load_config, GatewayConfig};
use edge_gate::observability::{logging, metrics};
use edge_gate::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "edge-gate")]
#[command(about = "Edge pipeline gating and localizing requests for a web application", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "EDGE_GATE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "edge-gate starting");

    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
