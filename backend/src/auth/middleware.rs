//! Extraction of per-request credentials for protected routes.
//!
//! Protected endpoints carry no session: the caller repeats `username` and
//! `password` as request headers on every call, and the handler re-checks
//! them against the directory.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

pub const USERNAME_HEADER: &str = "username";
pub const PASSWORD_HEADER: &str = "password";

/// Header credentials as sent. Absent, empty or non UTF-8 values are `None`.
#[derive(Debug, Default, Clone)]
pub struct HeaderCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl HeaderCredentials {
    fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            username: header_value(headers, USERNAME_HEADER),
            password: header_value(headers, PASSWORD_HEADER),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl<S> FromRequestParts<S> for HeaderCredentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
