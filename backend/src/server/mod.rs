//! Server construction: binds the listener around the shared application.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use state_builders::{GatewayPorts, build_ports};

use actix_web::dev::Server;
use actix_web::{HttpServer, web};

use geogate::inbound::http::app::{AppDependencies, build_app};
use geogate::inbound::http::health::HealthState;
use geogate::inbound::http::routes::RouteConfig;

/// Construct an Actix HTTP server using the provided health state and ports.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    ports: GatewayPorts,
) -> std::io::Result<Server> {
    let GatewayPorts { http_state, tokens } = ports;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(http_state),
        routes: RouteConfig {
            tokens,
            auth_routes: config.auth_routes,
        },
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
