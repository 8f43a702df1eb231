//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **dadata**: reqwest client for Dadata's cleaning and geolocation APIs
//! - **persistence**: process-local user storage
//! - **security**: bcrypt password hashing and HS256 bearer tokens
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod dadata;
pub mod persistence;
pub mod security;
