//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use geogate::domain::AccountManager;
use geogate::domain::ports::TokenService;
use geogate::inbound::http::state::HttpState;
use geogate::outbound::dadata::DadataHttpProvider;
use geogate::outbound::persistence::InMemoryUserRepository;
use geogate::outbound::security::{BcryptPasswordHasher, JwtTokenService, JwtTokenServiceConfig};
use geogate::settings::ResolvedSettings;

/// Port implementations shared by every worker.
#[derive(Clone)]
pub(crate) struct GatewayPorts {
    pub(crate) http_state: HttpState,
    pub(crate) tokens: Arc<dyn TokenService>,
}

/// Build the production adapters from validated settings.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the upstream HTTP client cannot be built.
pub(crate) fn build_ports(settings: &ResolvedSettings) -> std::io::Result<GatewayPorts> {
    let addresses = DadataHttpProvider::new(
        settings.endpoints.clone(),
        settings.credentials.clone(),
        settings.upstream_timeout,
    )
    .map_err(|e| std::io::Error::other(format!("failed to build Dadata client: {e}")))?;

    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        JwtTokenServiceConfig::new(settings.jwt_secret.as_str()).with_ttl(settings.token_ttl),
    ));
    let accounts = AccountManager::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptPasswordHasher::default()),
        Arc::clone(&tokens),
    );

    Ok(GatewayPorts {
        http_state: HttpState::new(Arc::new(addresses), Arc::new(accounts)),
        tokens,
    })
}
