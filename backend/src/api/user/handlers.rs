//! Handler functions for user listing endpoints.
//!
//! The listing is a protected route: credentials come from request headers
//! and are checked on every call.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use crate::auth::{HeaderCredentials, PublicUser};
use crate::errors::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<PublicUser>,
}

pub async fn list_users(
    State(state): State<AppState>,
    creds: HeaderCredentials,
) -> ApiResult<Json<UsersResponse>> {
    let users = state
        .directory
        .list_if_authorized(creds.username.as_deref(), creds.password.as_deref())?;

    debug!(count = users.len(), "listed users");
    Ok(Json(UsersResponse { users }))
}
