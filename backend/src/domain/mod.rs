//! Domain primitives, use-cases and ports.
//!
//! Purpose: define the strongly typed address and account model used by the
//! inbound and outbound adapters. Types here carry no HTTP or provider
//! specifics; serialisation contracts are documented on each type.
//!
//! Public surface:
//! - Address types (`SearchQuery`, `Coordinates`, `SearchResult`,
//!   `GeocodeResult`, ...) and the `AddressLookup` union.
//! - Account types (`Login`, `LoginCredentials`, `User`, `BearerToken`,
//!   `TokenClaims`) and the `AccountManager` use-case service.
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - `TraceId`: request correlation identifier.

pub mod accounts;
pub mod address;
pub mod auth;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::accounts::AccountManager;
pub use self::address::{
    AddressLookup, AddressLookupResult, Coordinates, GeocodeResult, MetroStation, SearchQuery,
    SearchResult, Suggestion, SuggestionData,
};
pub use self::auth::{BearerToken, LoginCredentials, LoginValidationError, TokenClaims};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{Login, PasswordHash, User, UserValidationError};

/// Response header carrying the request's [`TraceId`].
pub const TRACE_ID_HEADER: &str = "trace-id";
