//! Document proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  DOCPROXY                    │
//!   Client Request     │  ┌────────┐   ┌──────────┐   ┌───────────┐   │
//!   ───────────────────┼─▶│  http  │──▶│ routing  │──▶│ handlers  │───┼──▶ origin / reader /
//!                      │  │ server │   │ (prefix) │   │ api/reader│   │    PDF text service
//!                      │  └────────┘   └──────────┘   │ /pdf      │   │
//!                      │                              └─────┬─────┘   │
//!   Client Response    │  ┌────────┐   ┌──────────┐         │         │
//!   ◀──────────────────┼──│  cors  │◀──│  render  │◀────────┘         │
//!                      │  └────────┘   └──────────┘                   │
//!                      │  config · observability · resilience ·       │
//!                      │  lifecycle                                   │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use docproxy::config::{load_or_default, validate_config, ConfigError};
use docproxy::lifecycle::signals::spawn_signal_listener;
use docproxy::observability::{logging, metrics};
use docproxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "docproxy", version)]
#[command(about = "CORS-friendly proxy rendering web pages, reader output and PDFs as HTML", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!("docproxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        reader_base_url = %config.upstreams.reader_base_url,
        pdf_extract_url = %config.upstreams.pdf_extract_url,
        request_timeout_secs = config.timeouts.request_secs,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
