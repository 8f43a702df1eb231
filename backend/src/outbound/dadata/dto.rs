//! DTOs for the Dadata cleaning and geolocation payloads.
//!
//! Dadata reports missing values as `null`; the DTOs decode those to empty
//! strings, zero distances and empty lists before mapping into domain
//! records. Unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{GeocodeResult, MetroStation, SearchResult, Suggestion, SuggestionData};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize)]
pub(super) struct GeolocateRequestDto<'a> {
    pub(super) lat: &'a str,
    pub(super) lon: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct CleanedAddressDto {
    #[serde(default, deserialize_with = "null_as_default")]
    source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    result: String,
    #[serde(default, deserialize_with = "null_as_default")]
    metro: Vec<MetroDto>,
}

#[derive(Debug, Deserialize)]
struct MetroDto {
    #[serde(default, deserialize_with = "null_as_default")]
    distance: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    line: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeolocateResponseDto {
    #[serde(default, deserialize_with = "null_as_default")]
    suggestions: Vec<SuggestionDto>,
}

#[derive(Debug, Deserialize)]
struct SuggestionDto {
    #[serde(default, deserialize_with = "null_as_default")]
    value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    unrestricted_value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    data: SuggestionDataDto,
}

#[derive(Debug, Default, Deserialize)]
struct SuggestionDataDto {
    #[serde(default, deserialize_with = "null_as_default")]
    postal_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    country: String,
}

impl From<CleanedAddressDto> for SearchResult {
    fn from(dto: CleanedAddressDto) -> Self {
        Self {
            source: dto.source,
            result: dto.result,
            metro: dto.metro.into_iter().map(MetroStation::from).collect(),
        }
    }
}

impl From<MetroDto> for MetroStation {
    fn from(dto: MetroDto) -> Self {
        Self {
            distance: dto.distance,
            line: dto.line,
            name: dto.name,
        }
    }
}

impl From<GeolocateResponseDto> for GeocodeResult {
    fn from(dto: GeolocateResponseDto) -> Self {
        Self {
            suggestions: dto.suggestions.into_iter().map(Suggestion::from).collect(),
        }
    }
}

impl From<SuggestionDto> for Suggestion {
    fn from(dto: SuggestionDto) -> Self {
        Self {
            value: dto.value,
            unrestricted_value: dto.unrestricted_value,
            data: SuggestionData {
                postal_code: dto.data.postal_code,
                country: dto.data.country,
            },
        }
    }
}
