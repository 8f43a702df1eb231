//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, AddressProvider};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub addresses: Arc<dyn AddressProvider>,
    pub accounts: Arc<dyn AccountService>,
}

impl HttpState {
    pub fn new(addresses: Arc<dyn AddressProvider>, accounts: Arc<dyn AccountService>) -> Self {
        Self {
            addresses,
            accounts,
        }
    }
}
