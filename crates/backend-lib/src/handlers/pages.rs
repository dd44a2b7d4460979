// ============================
// crates/backend-lib/src/handlers/pages.rs
// ============================
//! HTML pages and the health probe.
use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::Html,
    Extension,
};

use crate::auth::SessionClaims;
use crate::cookies::session_token;
use crate::views::{render_index, render_protected};
use crate::AppState;

/// Handler for `GET /`. Shows who is signed in, if anyone.
pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Html<String> {
    let username = match session_token(&headers) {
        Some(token) => match state.sessions.peek(token) {
            Ok(claims) => Some(claims.username),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring invalid session on index");
                None
            },
        },
        None => None,
    };

    Html(render_index(username.as_deref()))
}

/// Handler for `GET /protected`, mounted behind `require_auth`
pub async fn protected(Extension(claims): Extension<SessionClaims>) -> Html<String> {
    tracing::debug!(user_id = %claims.sub, "serving protected page");
    Html(render_protected(&claims))
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "Healthy"
}
