//! Authentication module for managing user accounts and access control.
//!
//! This module provides the user directory, the pluggable credential and id
//! strategies it relies on, the signup/login endpoints, and the header
//! credential extractor used by protected routes.

pub mod credentials;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use credentials::*;
pub use errors::*;
pub use middleware::*;
pub use models::*;
pub use routes::*;
pub use service::*;
