//! Module for user data API endpoints.
//!
//! Exposes the credential-gated listing of every registered account. Account
//! creation and login live in [`crate::auth`].

pub mod handlers;
pub mod routes;
