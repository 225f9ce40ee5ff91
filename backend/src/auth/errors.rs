//! Custom error types specific to authentication failures.
//!
//! These are domain errors only; the mapping to HTTP status codes lives in
//! [`crate::errors`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing credentials")]
    MissingCredentials,

    /// Every generated id collided with one already issued.
    #[error("could not generate a unique user id after {attempts} attempts")]
    IdGenerationFailed { attempts: usize },
}
