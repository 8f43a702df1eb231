//! Address search and geocoding handlers.
//!
//! ```text
//! POST /api/address/search  {"query":"moscow lubyanka 1"}
//! POST /api/address/geocode {"lat":"55.76","lon":"37.62"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::AddressProviderError;
use crate::domain::{AddressLookup, Coordinates, Error, SearchQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message returned when the address provider fails.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Dadata API error";

/// Request body for `POST /api/address/search`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[schema(example = "moscow lubyanka 1")]
    pub query: String,
}

/// Request body for `POST /api/address/geocode`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GeocodeRequest {
    #[schema(example = "55.7601")]
    pub lat: String,
    #[schema(example = "37.6187")]
    pub lon: String,
}

impl From<SearchRequest> for AddressLookup {
    fn from(value: SearchRequest) -> Self {
        Self::Search(SearchQuery::new(value.query))
    }
}

impl From<GeocodeRequest> for AddressLookup {
    fn from(value: GeocodeRequest) -> Self {
        Self::Geocode(Coordinates::new(value.lat, value.lon))
    }
}

fn map_provider_error(err: AddressProviderError) -> Error {
    warn!(error = %err, "address provider call failed");
    Error::upstream(UPSTREAM_ERROR_MESSAGE)
}

async fn lookup(state: &HttpState, request: AddressLookup) -> ApiResult<HttpResponse> {
    let result = request
        .dispatch(state.addresses.as_ref())
        .await
        .map_err(map_provider_error)?;
    Ok(HttpResponse::Ok().json(result))
}

/// Normalise a free-text address.
#[utoipa::path(
    post,
    path = "/api/address/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Cleaned addresses in provider order", body = [crate::inbound::http::schemas::SearchResultSchema]),
        (status = 400, description = "Invalid request format", body = String, content_type = "text/plain"),
        (status = 500, description = "Address provider failure", body = String, content_type = "text/plain")
    ),
    tags = ["address"],
    operation_id = "searchAddress",
    security([])
)]
#[post("/api/address/search")]
pub async fn search_address(
    state: web::Data<HttpState>,
    payload: web::Json<SearchRequest>,
) -> ApiResult<HttpResponse> {
    lookup(&state, payload.into_inner().into()).await
}

/// Resolve coordinates to nearby addresses.
#[utoipa::path(
    post,
    path = "/api/address/geocode",
    request_body = GeocodeRequest,
    responses(
        (status = 200, description = "Address suggestions nearest first", body = crate::inbound::http::schemas::GeocodeResultSchema),
        (status = 400, description = "Invalid request format", body = String, content_type = "text/plain"),
        (status = 500, description = "Address provider failure", body = String, content_type = "text/plain")
    ),
    tags = ["address"],
    operation_id = "geocodeAddress",
    security([])
)]
#[post("/api/address/geocode")]
pub async fn geocode_address(
    state: web::Data<HttpState>,
    payload: web::Json<GeocodeRequest>,
) -> ApiResult<HttpResponse> {
    lookup(&state, payload.into_inner().into()).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockAccountService, MockAddressProvider};
    use crate::domain::{GeocodeResult, MetroStation, SearchResult, Suggestion, SuggestionData};
    use crate::inbound::http::json::{INVALID_REQUEST_FORMAT, json_config};
    use actix_web::http::StatusCode;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::{App, test};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn post(
        provider: MockAddressProvider,
        uri: &str,
        body: &str,
    ) -> (StatusCode, Option<String>, Vec<u8>) {
        let state = HttpState::new(Arc::new(provider), Arc::new(MockAccountService::new()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .service(search_address)
                .service(geocode_address),
        )
        .await;
        let req = test::TestRequest::post()
            .uri(uri)
            .set_payload(body.to_owned())
            .to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = test::read_body(res).await.to_vec();
        (status, content_type, body)
    }

    #[actix_web::test]
    async fn search_returns_provider_results_as_bare_array() {
        let mut provider = MockAddressProvider::new();
        provider
            .expect_search()
            .with(eq(SearchQuery::new("123 Main St")))
            .times(1)
            .returning(|_| {
                Ok(vec![SearchResult {
                    source: "X".into(),
                    result: "123 Main St".into(),
                    metro: Vec::new(),
                }])
            });

        let (status, content_type, body) =
            post(provider, "/api/address/search", r#"{"query":"123 Main St"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(
            value,
            json!([{"source": "X", "result": "123 Main St", "metro": []}])
        );
    }

    #[actix_web::test]
    async fn search_preserves_provider_order() {
        let mut provider = MockAddressProvider::new();
        provider.expect_search().times(1).returning(|_| {
            Ok(["b", "a", "c"]
                .into_iter()
                .map(|name| SearchResult {
                    source: name.into(),
                    result: name.into(),
                    metro: vec![MetroStation {
                        distance: 1.0,
                        line: "L".into(),
                        name: name.into(),
                    }],
                })
                .collect())
        });

        let (status, _, body) = post(provider, "/api/address/search", r#"{"query":"q"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let value: Vec<SearchResult> = serde_json::from_slice(&body).expect("json body");
        let order: Vec<&str> = value.iter().map(|r| r.result.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[actix_web::test]
    async fn geocode_returns_provider_object() {
        let mut provider = MockAddressProvider::new();
        provider
            .expect_geocode()
            .with(eq(Coordinates::new("12.34", "56.78")))
            .times(1)
            .returning(|_| {
                Ok(GeocodeResult {
                    suggestions: vec![Suggestion {
                        value: "v".into(),
                        unrestricted_value: "uv".into(),
                        data: SuggestionData {
                            postal_code: "101000".into(),
                            country: "Russia".into(),
                        },
                    }],
                })
            });

        let (status, _, body) = post(
            provider,
            "/api/address/geocode",
            r#"{"lat":"12.34","lon":"56.78"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(
            value,
            json!({"suggestions": [{
                "value": "v",
                "unrestricted_value": "uv",
                "data": {"postal_code": "101000", "country": "Russia"}
            }]})
        );
    }

    #[rstest]
    #[case::search_not_json("/api/address/search", "not json")]
    #[case::search_missing_field("/api/address/search", r#"{"q":"x"}"#)]
    #[case::search_wrong_type("/api/address/search", r#"{"query":5}"#)]
    #[case::search_null("/api/address/search", "null")]
    #[case::search_trailing_data("/api/address/search", r#"{"query":"x"} trailing"#)]
    #[case::geocode_empty("/api/address/geocode", "")]
    #[case::geocode_missing_lon("/api/address/geocode", r#"{"lat":"1"}"#)]
    #[case::geocode_numbers("/api/address/geocode", r#"{"lat":1.0,"lon":2.0}"#)]
    #[actix_web::test]
    async fn undecodable_bodies_are_rejected_before_the_provider(
        #[case] uri: &str,
        #[case] body: &str,
    ) {
        let mut provider = MockAddressProvider::new();
        provider.expect_search().never();
        provider.expect_geocode().never();

        let (status, content_type, body) = post(provider, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
        assert_eq!(body, INVALID_REQUEST_FORMAT.as_bytes());
    }

    fn failing_provider(failure: AddressProviderError) -> MockAddressProvider {
        let mut provider = MockAddressProvider::new();
        let search_failure = failure.clone();
        provider
            .expect_search()
            .returning(move |_| Err(search_failure.clone()));
        provider
            .expect_geocode()
            .returning(move |_| Err(failure.clone()));
        provider
    }

    #[rstest]
    #[case::transport(AddressProviderError::transport("connection refused"))]
    #[case::timeout(AddressProviderError::timeout("deadline elapsed"))]
    #[case::status(AddressProviderError::status(403_u16, "Zero balance"))]
    #[case::decode(AddressProviderError::decode("expected array"))]
    #[actix_web::test]
    async fn provider_failures_are_500_without_partial_body(
        #[case] failure: AddressProviderError,
        #[values(
            ("/api/address/search", r#"{"query":"q"}"#),
            ("/api/address/geocode", r#"{"lat":"1","lon":"2"}"#)
        )]
        request: (&str, &str),
    ) {
        let (uri, body) = request;
        let (status, content_type, body) = post(failing_provider(failure), uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
        assert_eq!(body, UPSTREAM_ERROR_MESSAGE.as_bytes());
    }
}
