//! Gateway configuration loaded via OrthoConfig.
//!
//! Every field can be set through `GEOGATE_*` environment variables, CLI
//! flags or a configuration file. [`GatewaySettings::resolve`] applies the
//! defaults and validates the result before the server starts.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::outbound::dadata::{
    DEFAULT_CLEAN_URL, DEFAULT_GEOLOCATE_URL, DadataCredentials, DadataEndpoints,
};
use crate::outbound::security::DEFAULT_TOKEN_TTL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Raw configuration values as supplied by the operator.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GEOGATE")]
pub struct GatewaySettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Dadata API key, sent as `Authorization: Token <key>`.
    pub dadata_api_key: Option<String>,
    /// Dadata secret, sent as `X-Secret` to the cleaning endpoint.
    pub dadata_secret: Option<String>,
    /// Override for the address cleaning endpoint.
    pub clean_url: Option<String>,
    /// Override for the geolocation endpoint.
    pub geolocate_url: Option<String>,
    /// Per-request upstream timeout in seconds.
    pub upstream_timeout_secs: Option<u64>,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Lifetime of issued tokens in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Mount `POST /register` and `POST /login`; on unless set to `false`.
    pub auth_routes: Option<bool>,
}

impl std::fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("bind_addr", &self.bind_addr)
            .field("clean_url", &self.clean_url)
            .field("geolocate_url", &self.geolocate_url)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("auth_routes", &self.auth_routes)
            .finish_non_exhaustive()
    }
}

/// Startup failures caused by missing or malformed configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing required setting `{field}` (set GEOGATE_{env})")]
    Missing { field: &'static str, env: &'static str },
    #[error("setting `{field}` is not a valid URL: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("setting `bind_addr` is not a socket address: {value}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("setting `{field}` must be greater than zero")]
    Zero { field: &'static str },
}

/// Validated configuration consumed by the server bootstrap.
pub struct ResolvedSettings {
    pub bind_addr: SocketAddr,
    pub endpoints: DadataEndpoints,
    pub credentials: DadataCredentials,
    pub upstream_timeout: Duration,
    pub jwt_secret: Zeroizing<String>,
    pub token_ttl: Duration,
    pub auth_routes: bool,
}

impl std::fmt::Debug for ResolvedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSettings")
            .field("bind_addr", &self.bind_addr)
            .field("endpoints", &self.endpoints)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("token_ttl", &self.token_ttl)
            .field("auth_routes", &self.auth_routes)
            .finish_non_exhaustive()
    }
}

fn required(
    value: Option<&String>,
    field: &'static str,
    env: &'static str,
) -> Result<String, SettingsError> {
    value
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or(SettingsError::Missing { field, env })
}

fn url_or_default(
    value: Option<&str>,
    default: &str,
    field: &'static str,
) -> Result<Url, SettingsError> {
    Url::parse(value.unwrap_or(default))
        .map_err(|source| SettingsError::InvalidUrl { field, source })
}

fn positive_secs(
    value: Option<u64>,
    default: u64,
    field: &'static str,
) -> Result<Duration, SettingsError> {
    match value.unwrap_or(default) {
        0 => Err(SettingsError::Zero { field }),
        secs => Ok(Duration::from_secs(secs)),
    }
}

impl GatewaySettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Whether the registration and login routes are mounted.
    pub fn auth_routes(&self) -> bool {
        self.auth_routes.unwrap_or(true)
    }

    /// Apply defaults and validate every field.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a secret is missing, a URL or the bind
    /// address does not parse, or a duration is zero.
    pub fn resolve(&self) -> Result<ResolvedSettings, SettingsError> {
        let bind_addr = self
            .bind_addr()
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: self.bind_addr().to_owned(),
                source,
            })?;
        let api_key = required(self.dadata_api_key.as_ref(), "dadata_api_key", "DADATA_API_KEY")?;
        let secret = required(self.dadata_secret.as_ref(), "dadata_secret", "DADATA_SECRET")?;
        let jwt_secret = required(self.jwt_secret.as_ref(), "jwt_secret", "JWT_SECRET")?;

        Ok(ResolvedSettings {
            bind_addr,
            endpoints: DadataEndpoints {
                clean: url_or_default(self.clean_url.as_deref(), DEFAULT_CLEAN_URL, "clean_url")?,
                geolocate: url_or_default(
                    self.geolocate_url.as_deref(),
                    DEFAULT_GEOLOCATE_URL,
                    "geolocate_url",
                )?,
            },
            credentials: DadataCredentials::new(api_key, secret),
            upstream_timeout: positive_secs(
                self.upstream_timeout_secs,
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
                "upstream_timeout_secs",
            )?,
            jwt_secret: Zeroizing::new(jwt_secret),
            token_ttl: positive_secs(
                self.token_ttl_secs,
                DEFAULT_TOKEN_TTL.as_secs(),
                "token_ttl_secs",
            )?,
            auth_routes: self.auth_routes(),
        })
    }
}
