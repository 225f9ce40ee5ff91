//! Central module for organizing the application's HTTP surface.
//!
//! [`router`] assembles the authentication routes and the user data routes
//! into one application, and turns every unmatched path or method into a
//! JSON 404.

pub mod user;

use axum::Router;

use crate::auth::auth_router;
use crate::errors::ApiError;
use crate::middleware::trace_layer;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(auth_router())
        .merge(user::routes::user_router())
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(trace_layer())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}
