//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns:
//! tracing and access logging, panic recovery and bearer authentication.

pub mod bearer;
pub mod recover;
pub mod trace;

pub use bearer::RequireBearer;
pub use recover::CatchPanic;
pub use trace::Trace;
