//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the address, account and health paths, the schema
//! wrappers from [`crate::inbound::http::schemas`] and the bearer token
//! security scheme. Swagger UI serves the generated document.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::account::{AccountRequest, WhoAmIResponse};
use crate::inbound::http::address::{GeocodeRequest, SearchRequest};
use crate::inbound::http::schemas::{
    GeocodeResultSchema, MetroStationSchema, SearchResultSchema, SuggestionDataSchema,
    SuggestionSchema,
};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Address gateway API",
        description = "Address search and geocoding backed by Dadata, with token-based accounts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::address::search_address,
        crate::inbound::http::address::geocode_address,
        crate::inbound::http::account::register,
        crate::inbound::http::account::login,
        crate::inbound::http::account::whoami,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SearchRequest,
        GeocodeRequest,
        AccountRequest,
        WhoAmIResponse,
        SearchResultSchema,
        MetroStationSchema,
        GeocodeResultSchema,
        SuggestionSchema,
        SuggestionDataSchema,
    )),
    tags(
        (name = "address", description = "Address search and reverse geocoding"),
        (name = "account", description = "Registration, login and token-protected routes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
