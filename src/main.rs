//! Tunnel origin server.
//!
//! A small HTTP origin meant to sit behind an outbound tunnel so edge
//! features (DNS, TLS termination, firewall rules, caching, header
//! propagation) can be exercised against it.
//!
//! # Routes
//!
//! ```text
//!   GET /         status, origin id, host name, UTC time
//!   GET /headers  client address and every received header
//!   GET /slow     answers after a fixed delay (5s by default)
//!   GET /error    always 500 {"detail": "simulated 500"}
//!   *             404 {"detail": "Not Found"}
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use origin_server::config::{load_config, validate_config, ConfigError, OriginConfig};
use origin_server::observability::{logging, metrics};
use origin_server::{OriginServer, Shutdown};

#[derive(Parser)]
#[command(name = "origin-server")]
#[command(about = "HTTP origin to expose through a tunnel", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind, overriding the config file.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => OriginConfig::default(),
    };
    config.override_bind(args.host.as_deref(), args.port);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability.log_filter)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        origin = %config.origin.name,
        slow_delay_secs = config.origin.slow_delay_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    OriginServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
