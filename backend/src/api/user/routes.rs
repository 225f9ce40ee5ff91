//! Defines the HTTP routes for user data.

use axum::{routing::get, Router};

use super::handlers::list_users;
use crate::AppState;

pub fn user_router() -> Router<AppState> {
    Router::new().route("/data", get(list_users))
}
