use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use icestats::api;
use icestats::config::Config;
use icestats::geoip::GeoIpService;
use icestats::icecast::IcecastClient;
use icestats::stats::Collector;

#[derive(Parser)]
#[command(name = "icestats")]
#[command(about = "Icecast listener geolocation stats and Prometheus exporter", long_about = None)]
struct Cli {
    /// Listening port
    #[arg(short = 'p', long, default_value_t = 8080)]
    port: u16,

    /// Listening interface
    #[arg(short = 'i', long = "interface", default_value = "0.0.0.0")]
    iface: String,

    /// Path to config
    #[arg(short = 'f', long = "config", default_value = "icestats.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {}", cli.config);
    if config.mounts.is_empty() {
        info!("No mounts configured, mounts will be discovered from {}", config.url);
    } else {
        info!("Reporting on mounts: {}", config.mounts.join(", "));
    }

    let geoip = GeoIpService::open(&config.geoip_db)?;
    info!("Opened GeoIP database: {}", config.geoip_db);

    let client = IcecastClient::new(&config)?;
    let collector = Collector::new(Arc::new(client), Arc::new(geoip), config.mounts.clone());

    let app = api::create_router(collector);

    let addr = format!("{}:{}", cli.iface, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("icestats listening on http://{}", addr);
    info!("   - JSON stats at http://{}/", addr);
    info!("   - Prometheus metrics at http://{}/metrics", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
