//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their structure for documentation only.

#![expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::MetroStation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MetroStation)]
pub struct MetroStationSchema {
    /// Distance to the station in kilometres.
    #[schema(example = 0.4)]
    distance: f64,
    #[schema(example = "Sokolnicheskaya")]
    line: String,
    #[schema(example = "Lubyanka")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::SearchResult`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SearchResult)]
pub struct SearchResultSchema {
    /// Address as supplied in the query.
    #[schema(example = "moscow lubyanka 1")]
    source: String,
    /// Normalised address.
    #[schema(example = "Moscow, Lubyanka Sq, 1")]
    result: String,
    /// Nearby metro stations in provider order.
    metro: Vec<MetroStationSchema>,
}

/// OpenAPI schema for [`crate::domain::SuggestionData`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SuggestionData)]
pub struct SuggestionDataSchema {
    #[schema(example = "101000")]
    postal_code: String,
    #[schema(example = "Russia")]
    country: String,
}

/// OpenAPI schema for [`crate::domain::Suggestion`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Suggestion)]
pub struct SuggestionSchema {
    #[schema(example = "Moscow, Lubyanka Sq, 1")]
    value: String,
    #[schema(example = "101000, Moscow, Lubyanka Sq, 1")]
    unrestricted_value: String,
    data: SuggestionDataSchema,
}

/// OpenAPI schema for [`crate::domain::GeocodeResult`].
#[derive(ToSchema)]
#[schema(as = crate::domain::GeocodeResult)]
pub struct GeocodeResultSchema {
    /// Suggestions nearest first.
    suggestions: Vec<SuggestionSchema>,
}
