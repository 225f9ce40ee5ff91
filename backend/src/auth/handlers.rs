//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse the signup and login bodies, call into the
//! [`UserDirectory`](super::UserDirectory), and shape the JSON responses.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use super::errors::AuthError;
use super::models::{LoginRequest, LoginResponse, MessageResponse, NewUser, SignupRequest};
use crate::errors::{ApiError, ApiResult};
use crate::AppState;

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload.map_err(|err| {
        debug!(error = %err, "rejected signup body");
        ApiError::invalid_body()
    })?;

    let new_user = match (req.username, req.password) {
        (Some(username), Some(password)) => NewUser {
            username,
            password,
            first_name: req.first_name,
            last_name: req.last_name,
        },
        _ => return Err(missing_signup_credentials()),
    };

    match state.directory.register(new_user) {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "User created successfully",
            }),
        )),
        Err(AuthError::MissingCredentials) => Err(missing_signup_credentials()),
        Err(err) => Err(err.into()),
    }
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload.map_err(|err| {
        debug!(error = %err, "rejected login body");
        ApiError::invalid_body()
    })?;

    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();
    let user = state.directory.authenticate(&username, &password)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        auth_token: state.tokens.issue(),
    }))
}

/// Missing signup fields are a 400, unlike the 401 on authenticated routes.
fn missing_signup_credentials() -> ApiError {
    ApiError::bad_request(AuthError::MissingCredentials.to_string())
}
