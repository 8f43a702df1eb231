//! Route table for the REST surface.
//!
//! ```text
//! POST /api/address/search    public
//! POST /api/address/geocode   public
//! POST /register, /login      public, switchable
//! GET  /api/account/me        bearer token required
//! GET  /health/ready, /live   public
//! ```
//!
//! Callers register [`HttpState`](super::state::HttpState) and
//! [`HealthState`](super::health::HealthState) as app data.

use std::sync::Arc;

use actix_web::web;

use super::json::json_config;
use super::{account, address, health};
use crate::domain::ports::TokenService;
use crate::middleware::RequireBearer;

/// Options shaping the route table.
#[derive(Clone)]
pub struct RouteConfig {
    /// Verifier for the protected account routes.
    pub tokens: Arc<dyn TokenService>,
    /// Mount `POST /register` and `POST /login`.
    pub auth_routes: bool,
}

/// Register every handler, the JSON extractor settings and the bearer gate.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::App;
/// use geogate::inbound::http::routes::{RouteConfig, configure};
/// use geogate::outbound::security::{JwtTokenService, JwtTokenServiceConfig};
///
/// let routes = RouteConfig {
///     tokens: Arc::new(JwtTokenService::new(JwtTokenServiceConfig::new("secret"))),
///     auth_routes: true,
/// };
/// let app = App::new().configure(|cfg| configure(cfg, &routes));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, routes: &RouteConfig) {
    cfg.app_data(json_config())
        .service(address::search_address)
        .service(address::geocode_address)
        .service(health::ready)
        .service(health::live);

    if routes.auth_routes {
        cfg.service(account::register).service(account::login);
    }

    cfg.service(
        web::scope("/api/account")
            .wrap(RequireBearer::new(Arc::clone(&routes.tokens)))
            .service(account::whoami),
    );
}
