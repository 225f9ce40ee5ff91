//! Defines the HTTP routes specifically for authentication.
//!
//! Signup and login are public; they are merged into the main router in
//! [`crate::api::router`].

use axum::{routing::post, Router};

use super::handlers::{login, signup};
use crate::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}
