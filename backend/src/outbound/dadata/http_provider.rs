//! Reqwest-backed Dadata adapter.
//!
//! This adapter owns transport details only: request serialisation,
//! credentials, timeout and HTTP error mapping, and JSON decoding into domain
//! records.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{CleanedAddressDto, GeolocateRequestDto, GeolocateResponseDto};
use crate::domain::ports::{AddressProvider, AddressProviderError};
use crate::domain::{Coordinates, GeocodeResult, SearchQuery, SearchResult};

/// Default Dadata address cleaning endpoint.
pub const DEFAULT_CLEAN_URL: &str = "https://cleaner.dadata.ru/api/v1/clean/address";
/// Default Dadata reverse-geocoding endpoint.
pub const DEFAULT_GEOLOCATE_URL: &str =
    "http://suggestions.dadata.ru/suggestions/api/4_1/rs/geolocate/address";

const SECRET_HEADER: &str = "X-Secret";
const JSON: &str = "application/json";

/// API key and secret issued by Dadata.
///
/// Both values are zeroised on drop and redacted from `Debug`.
#[derive(Clone)]
pub struct DadataCredentials {
    api_key: Zeroizing<String>,
    secret: Zeroizing<String>,
}

impl DadataCredentials {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: Zeroizing::new(api_key.into()),
            secret: Zeroizing::new(secret.into()),
        }
    }

    fn authorization(&self) -> String {
        format!("Token {}", self.api_key.as_str())
    }
}

impl fmt::Debug for DadataCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DadataCredentials(<redacted>)")
    }
}

/// Endpoint URLs for the two Dadata operations.
#[derive(Debug, Clone)]
pub struct DadataEndpoints {
    /// Address cleaning endpoint used by `search`.
    pub clean: Url,
    /// Reverse-geocoding endpoint used by `geocode`.
    pub geolocate: Url,
}

/// Dadata adapter performing authenticated JSON POSTs.
pub struct DadataHttpProvider {
    client: Client,
    endpoints: DadataEndpoints,
    credentials: DadataCredentials,
}

impl DadataHttpProvider {
    /// Build an adapter whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoints: DadataEndpoints,
        credentials: DadataCredentials,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoints,
            credentials,
        })
    }

    async fn post_json<B, T>(
        &self,
        url: &Url,
        body: &B,
        with_secret: bool,
    ) -> Result<T, AddressProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .header(AUTHORIZATION, self.credentials.authorization())
            .json(body);
        if with_secret {
            request = request.header(SECRET_HEADER, self.credentials.secret.as_str());
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode(body.as_ref())
    }
}

#[async_trait]
impl AddressProvider for DadataHttpProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, AddressProviderError> {
        let cleaned: Vec<CleanedAddressDto> = self
            .post_json(&self.endpoints.clean, &[query.as_str()], true)
            .await?;
        Ok(cleaned.into_iter().map(SearchResult::from).collect())
    }

    async fn geocode(
        &self,
        coordinates: &Coordinates,
    ) -> Result<GeocodeResult, AddressProviderError> {
        let body = GeolocateRequestDto {
            lat: coordinates.lat(),
            lon: coordinates.lon(),
        };
        let decoded: GeolocateResponseDto = self
            .post_json(&self.endpoints.geolocate, &body, false)
            .await?;
        let result = GeocodeResult::from(decoded);
        debug!(
            suggestions = result.suggestions.len(),
            values = ?result.suggestions.iter().map(|s| s.value.as_str()).collect::<Vec<_>>(),
            "geocode result decoded"
        );
        Ok(result)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, AddressProviderError> {
    serde_json::from_slice(body).map_err(|error| {
        AddressProviderError::decode(format!("invalid Dadata JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> AddressProviderError {
    if error.is_timeout() {
        AddressProviderError::timeout(error.to_string())
    } else {
        AddressProviderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AddressProviderError {
    AddressProviderError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network decoding and mapping helpers.

    use super::*;
    use rstest::rstest;

    #[test]
    fn decodes_cleaned_addresses_in_order() {
        let body = r#"[
            {"source": "a", "result": "first", "metro": [
                {"distance": 0.4, "line": "Sokolnicheskaya", "name": "Lubyanka"},
                {"distance": 1.1, "line": "Kaluzhsko-Rizhskaya", "name": "Kitay-gorod"}
            ], "postal_code": "101000"},
            {"source": "b", "result": "second", "metro": null}
        ]"#;

        let decoded: Vec<CleanedAddressDto> = decode(body.as_bytes()).expect("valid payload");
        let results: Vec<SearchResult> = decoded.into_iter().map(SearchResult::from).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].result, "first");
        assert_eq!(results[0].metro[1].name, "Kitay-gorod");
        assert_eq!(results[1].result, "second");
        assert!(results[1].metro.is_empty(), "null metro decodes to empty");
    }

    #[test]
    fn decodes_null_strings_as_empty() {
        let body = r#"{"suggestions": [
            {"value": "v", "unrestricted_value": null, "data": {"postal_code": null, "country": "Russia"}}
        ]}"#;

        let decoded: GeolocateResponseDto = decode(body.as_bytes()).expect("valid payload");
        let result = GeocodeResult::from(decoded);
        assert_eq!(result.suggestions[0].unrestricted_value, "");
        assert_eq!(result.suggestions[0].data.postal_code, "");
        assert_eq!(result.suggestions[0].data.country, "Russia");
    }

    #[rstest]
    #[case::object_instead_of_array(r#"{"detail": "nope"}"#)]
    #[case::truncated(r#"[{"source": "a""#)]
    #[case::html(r"<html>Bad Gateway</html>")]
    fn rejects_bodies_that_are_not_search_arrays(#[case] body: &str) {
        let error = decode::<Vec<CleanedAddressDto>>(body.as_bytes()).expect_err("must fail");
        assert!(matches!(error, AddressProviderError::Decode { .. }));
    }

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::FORBIDDEN)]
    #[case(StatusCode::TOO_MANY_REQUESTS)]
    #[case(StatusCode::BAD_GATEWAY)]
    fn non_success_statuses_map_to_status_errors(#[case] status: StatusCode) {
        let error = map_status_error(status, b"{\"detail\": \"Zero balance\"}");
        assert_eq!(
            error,
            AddressProviderError::status(status.as_u16(), "{\"detail\": \"Zero balance\"}")
        );
    }

    #[test]
    fn body_preview_compacts_and_truncates() {
        let long = format!("a  b\n{}", "x".repeat(400));
        let preview = body_preview(long.as_bytes());
        assert!(preview.starts_with("a b "));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[test]
    fn credentials_are_redacted() {
        let creds = DadataCredentials::new("api-key-value", "secret-value");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("api-key-value"));
        assert!(!rendered.contains("secret-value"));
        assert_eq!(creds.authorization(), "Token api-key-value");
    }
}
