//! Dadata outbound adapter.
//!
//! Provides a thin HTTP implementation of the `AddressProvider` port against
//! Dadata's address cleaning and geolocation APIs.

mod dto;
mod http_provider;

pub use http_provider::{
    DEFAULT_CLEAN_URL, DEFAULT_GEOLOCATE_URL, DadataCredentials, DadataEndpoints,
    DadataHttpProvider,
};
