//! Multi-tenant HTTP mock server.
//!
//! Clients register fake endpoints through the admin surface and the server
//! replays them, keeping a history of every request each endpoint served.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 MOCK SERVER                   │
//!     Client Request     │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!     ───────────────────┼─▶│  http  │──▶│  region  │──▶│  routing   │  │
//!                        │  │ server │   │ resolver │   │   table    │  │
//!                        │  └────────┘   └──────────┘   └─────┬──────┘  │
//!                        │                                    │         │
//!                        │                  ┌─────────────────┴──┐      │
//!                        │                  ▼                    ▼      │
//!                        │           ┌────────────┐      ┌────────────┐ │
//!                        │           │   admin    │      │  history   │ │
//!                        │           │ operations │      │ + script   │ │
//!     Client Response    │           └─────┬──────┘      └─────┬──────┘ │
//!     ◀──────────────────┼─────────────────┴───────────────────┘        │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use mock_server::config::loader::load_config;
use mock_server::config::MockConfig;
use mock_server::lifecycle::{signals, Shutdown};
use mock_server::observability::{logging, metrics};
use mock_server::HttpServer;

#[derive(Parser)]
#[command(name = "mock-server")]
#[command(about = "Multi-tenant HTTP mock server", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TCP address to listen to; overrides the config file.
    #[arg(short, long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MockConfig::default(),
    };
    if let Some(addr) = args.addr {
        config.listener.bind_address = addr;
    }

    logging::init(&config.observability)?;
    tracing::info!("mock-server v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        admin_prefix = %config.admin.path_prefix,
        identity_header = %config.region.identity_header,
        log_preview_bytes = config.history.log_preview_bytes,
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
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        if shutdown.trigger() {
            tracing::info!("Draining in-flight requests");
        }
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
