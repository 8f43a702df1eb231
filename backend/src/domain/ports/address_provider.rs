//! Driven port for the third-party address provider.
//!
//! The domain owns the request and result shapes; adapters own transport,
//! credentials and JSON decoding.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Coordinates, GeocodeResult, SearchQuery, SearchResult};

define_port_error! {
    /// Failures raised while calling the address provider.
    ///
    /// Every variant is terminal for the request; there is no retry.
    pub enum AddressProviderError {
        /// The request never produced a response.
        Transport { message: String } =>
            "address provider transport failed: {message}",
        /// The client-side timeout elapsed.
        Timeout { message: String } =>
            "address provider timed out: {message}",
        /// The provider answered with a non-success status.
        Status { status: u16, message: String } =>
            "address provider returned status {status}: {message}",
        /// The response body did not match the expected schema.
        Decode { message: String } =>
            "address provider response decode failed: {message}",
    }
}

/// Port for cleaning free-text addresses and reverse-geocoding coordinates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressProvider: Send + Sync {
    /// Clean `query` into zero or more structured addresses.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, AddressProviderError>;

    /// Suggest addresses near `coordinates`.
    async fn geocode(&self, coordinates: &Coordinates)
    -> Result<GeocodeResult, AddressProviderError>;
}

/// Fixture provider echoing the query back as a single cleaned address.
///
/// Useful for local wiring and router tests where no network is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAddressProvider;

#[async_trait]
impl AddressProvider for FixtureAddressProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, AddressProviderError> {
        Ok(vec![SearchResult {
            source: query.as_str().to_owned(),
            result: query.as_str().to_owned(),
            metro: Vec::new(),
        }])
    }

    async fn geocode(
        &self,
        _coordinates: &Coordinates,
    ) -> Result<GeocodeResult, AddressProviderError> {
        Ok(GeocodeResult::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_echoes_query() {
        let results = FixtureAddressProvider
            .search(&SearchQuery::new("123 Main St"))
            .await
            .expect("fixture never fails");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].result, "123 Main St");
    }

    #[rstest]
    #[case(AddressProviderError::status(503_u16, "unavailable"), "address provider returned status 503: unavailable")]
    #[case(AddressProviderError::decode("expected array"), "address provider response decode failed: expected array")]
    fn errors_render_context(#[case] error: AddressProviderError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
