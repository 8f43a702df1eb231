//! HTTP server configuration object.

use std::net::SocketAddr;

use geogate::settings::ResolvedSettings;

/// Listener and routing options for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) auth_routes: bool,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            auth_routes: true,
        }
    }

    /// Toggle `POST /register` and `POST /login`.
    #[must_use]
    pub fn with_auth_routes(mut self, enabled: bool) -> Self {
        self.auth_routes = enabled;
        self
    }
}

impl From<&ResolvedSettings> for ServerConfig {
    fn from(settings: &ResolvedSettings) -> Self {
        Self::new(settings.bind_addr).with_auth_routes(settings.auth_routes)
    }
}
