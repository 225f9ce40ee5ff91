//! authgate: an in-memory user directory served over HTTP.
//!
//! Accounts are created with `POST /signup`, checked with `POST /login`, and
//! listed through the protected `GET /data` route, which re-authenticates
//! from request headers on every call.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod middleware;

use std::sync::Arc;

use auth::{OpaqueTokenIssuer, TokenIssuer, UserDirectory};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl AppState {
    pub fn new(directory: UserDirectory) -> Self {
        Self::with_token_issuer(directory, OpaqueTokenIssuer)
    }

    pub fn with_token_issuer(
        directory: UserDirectory,
        tokens: impl TokenIssuer + 'static,
    ) -> Self {
        Self {
            directory: Arc::new(directory),
            tokens: Arc::new(tokens),
        }
    }
}
