//! WebID proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────┐
//!                         │                  WEBID PROXY                   │
//!                         │                                                │
//!     Client Request      │  ┌────────┐   ┌──────────┐   ┌─────────────┐  │
//!     ────────────────────┼─▶│  http  │──▶│  filter  │──▶│   proxy     │  │
//!                         │  │ server │   │  chain   │   │   engine    │──┼──▶ Backend
//!                         │  └────────┘   └──────────┘   └──────┬──────┘  │
//!     Client Response     │                                     │         │
//!     ◀───────────────────┼─────────────── streamed body ◀──────┘         │
//!                         │                                                │
//!                         │  config (target cell, reload) · observability │
//!                         │  lifecycle (signals, shutdown)                 │
//!                         └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use webid_proxy::config::{load_config, ConfigWatcher, ProxyConfig, TargetProperties};
use webid_proxy::observability::init_logging;
use webid_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "webid-proxy")]
#[command(about = "Reverse proxy forwarding every request to a single backend", long_about = None)]
struct Cli {
    /// TOML configuration file; watched for changes.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URI, overriding the configuration file.
    #[arg(short, long)]
    target: Option<String>,

    /// Listen address, overriding the configuration file.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(target) = cli.target.clone() {
        config.target = Some(TargetProperties::new(target));
    }
    if let Some(bind) = cli.bind.clone() {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);

    tracing::info!("webid-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_uri = ?config.target.as_ref().and_then(|t| t.target_base_uri.as_deref()),
        "Configuration loaded"
    );

    // CLI overrides apply to the initial load only.
    let (_watcher, config_updates) = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
