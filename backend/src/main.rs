//! Gateway entry-point: loads configuration, installs tracing and starts the
//! HTTP server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use geogate::inbound::http::health::HealthState;
use geogate::settings::GatewaySettings;
use server::{ServerConfig, build_ports, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GatewaySettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let resolved = settings.resolve().map_err(std::io::Error::other)?;
    info!(settings = ?resolved, "configuration loaded");

    let ports = build_ports(&resolved)?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::from(&resolved), ports)?;
    info!(bind_addr = %resolved.bind_addr, "listening");
    server.await
}
