// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! `/register`, `/login` and `/logout`.
use std::sync::Arc;

use authgate_common::{LoginResponse, LogoutResponse, PublicUser, RegisterResponse, PROTECTED_PATH};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::credentials::CredentialsForm;
use crate::cookies::{clear_session_cookie, session_cookie};
use crate::error::AppError;
use crate::AppState;

/// Surface a failure with the route's status unless it is a server fault
fn reject(err: AppError, status: StatusCode) -> Response {
    if err.status_code().is_server_error() {
        err.into_response()
    } else {
        err.into_response_with(status)
    }
}

/// Mint a token for `user` and answer with `body` plus the session cookie
fn start_session<B: Serialize>(state: &AppState, user: &PublicUser, body: B) -> Result<Response, AppError> {
    let token = state.sessions.issue(&user.id, &user.username)?;
    let cookie = session_cookie(&token, state.sessions.ttl(), state.settings.is_production())?;
    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// Handler for `POST /register`. Every client error is a 400.
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<CredentialsForm, AppError>,
) -> Response {
    let result = async {
        let CredentialsForm(credentials) = payload?;
        tracing::info!(username = %credentials.username, "registration attempt");
        let user = state.users.register(credentials).await?;
        start_session(
            &state,
            &user,
            RegisterResponse {
                success: true,
                username: user.username.clone(),
            },
        )
    }
    .await;

    result.unwrap_or_else(|err| reject(err, StatusCode::BAD_REQUEST))
}

/// Handler for `POST /login`. Every client error is a 401.
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<CredentialsForm, AppError>,
) -> Response {
    let result = async {
        let CredentialsForm(credentials) = payload?;
        tracing::info!(username = %credentials.username, "login attempt");
        let user = state.users.login(credentials).await?;
        start_session(
            &state,
            &user,
            LoginResponse {
                success: true,
                username: user.username.clone(),
                redirect: PROTECTED_PATH.to_string(),
            },
        )
    }
    .await;

    result.unwrap_or_else(|err| reject(err, StatusCode::UNAUTHORIZED))
}

/// Handler for `POST /logout`
pub async fn logout(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    tracing::info!("clearing session cookie");
    let cookie = clear_session_cookie(state.settings.is_production())?;
    Ok(([(SET_COOKIE, cookie)], Json(LogoutResponse { success: true })).into_response())
}
