//! Path-prefix reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request    ┌────────────────────────────────────────────────┐
//!     ─────────────────▶│ request id → trace → Forwarder(/a) → ...       │
//!                       │                         │ no match             │
//!                       │                         ▼                      │
//!                       │                   Forwarder(/b) → 404 fallback │
//!                       │                         │ match                │
//!                       │                         ▼                      │
//!                       │   translate → Transport::send → relay          │──▶ Upstream
//!     Client Response   │                                                │
//!     ◀─────────────────│◀──────────── streamed body ────────────────────│◀──
//!                       └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use prefix_proxy::config::{load_config, ProxyConfig};
use prefix_proxy::observability::{logging, metrics};
use prefix_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "prefix-proxy")]
#[command(about = "Forward path prefixes to upstream origins", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("prefix-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
