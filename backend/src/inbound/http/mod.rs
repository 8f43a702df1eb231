//! HTTP inbound adapter exposing REST endpoints.

pub mod account;
pub mod address;
pub mod app;
pub mod error;
pub mod health;
pub mod json;
pub mod routes;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
