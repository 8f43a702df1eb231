//! JSON body extraction settings shared by every handler.

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

/// Message returned when a request body cannot be decoded.
pub const INVALID_REQUEST_FORMAT: &str = "Invalid request format";

/// Extractor configuration turning any decode failure into a 400.
///
/// Bodies are decoded regardless of the request `Content-Type`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, req| {
            debug!(error = %err, path = %req.path(), "rejecting undecodable request body");
            Error::invalid_request(INVALID_REQUEST_FORMAT).into()
        })
}
