//! Address gateway library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] owns the address and
//! account types plus the ports, [`outbound`] implements the driven ports
//! (Dadata, bcrypt, JWT, in-memory users), and [`inbound`] exposes the REST
//! surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::{CatchPanic, RequireBearer, Trace};
