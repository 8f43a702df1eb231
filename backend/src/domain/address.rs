//! Address search and geocoding types.
//!
//! These records mirror the provider's response schema and are serialised
//! straight back to clients, so field names follow the provider's snake_case
//! keys. Sequences keep the order the provider returned; nothing here sorts.

use serde::{Deserialize, Serialize};

use super::ports::{AddressProvider, AddressProviderError};

/// Free-text address query forwarded to the cleaning endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Latitude/longitude pair forwarded to the geolocation endpoint.
///
/// Values are kept as the caller's strings; the provider parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    lat: String,
    lon: String,
}

impl Coordinates {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    pub fn lat(&self) -> &str {
        self.lat.as_str()
    }

    pub fn lon(&self) -> &str {
        self.lon.as_str()
    }
}

/// Metro station near a cleaned address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetroStation {
    /// Distance to the station in kilometres.
    pub distance: f64,
    pub line: String,
    pub name: String,
}

/// One cleaned address returned by the search endpoint.
///
/// # Examples
/// ```
/// use geogate::domain::SearchResult;
///
/// let result = SearchResult {
///     source: "X".into(),
///     result: "123 Main St".into(),
///     metro: Vec::new(),
/// };
/// let json = serde_json::to_string(&result).unwrap();
/// assert_eq!(json, r#"{"source":"X","result":"123 Main St","metro":[]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Address as supplied in the query.
    pub source: String,
    /// Normalised address.
    pub result: String,
    pub metro: Vec<MetroStation>,
}

/// Postal attributes attached to a geocode suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionData {
    pub postal_code: String,
    pub country: String,
}

/// Address suggestion for a coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Short address form.
    pub value: String,
    /// Full address including region and postal code.
    pub unrestricted_value: String,
    pub data: SuggestionData,
}

/// Geocode result: nearby address suggestions, nearest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub suggestions: Vec<Suggestion>,
}

/// Provider call requested by an inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressLookup {
    Search(SearchQuery),
    Geocode(Coordinates),
}

/// Response envelope produced per endpoint.
///
/// Serialises untagged: a search yields the bare array and a geocode yields
/// the bare object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AddressLookupResult {
    Search(Vec<SearchResult>),
    Geocode(GeocodeResult),
}

impl AddressLookup {
    /// Forward the lookup to `provider`, wrapping the typed result in the
    /// matching envelope variant.
    pub async fn dispatch(
        &self,
        provider: &dyn AddressProvider,
    ) -> Result<AddressLookupResult, AddressProviderError> {
        match self {
            Self::Search(query) => provider.search(query).await.map(AddressLookupResult::Search),
            Self::Geocode(coordinates) => provider
                .geocode(coordinates)
                .await
                .map(AddressLookupResult::Geocode),
        }
    }
}
