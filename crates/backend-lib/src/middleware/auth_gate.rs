// ============================
// crates/backend-lib/src/middleware/auth_gate.rs
// ============================
//! Authentication gate for protected routes.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::cookies::session_token;
use crate::AppState;

/// Where unauthenticated requests are sent
pub const LOGIN_PAGE: &str = "/";

/// Let the request through only with a valid session cookie.
///
/// On success the decoded `SessionClaims` are placed in the request
/// extensions for the handler to pick up.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    let claims = match session_token(request.headers()) {
        Some(token) => state.sessions.verify(token),
        None => {
            tracing::debug!(%path, "no session cookie, redirecting to login");
            return Redirect::to(LOGIN_PAGE).into_response();
        },
    };

    match claims {
        Ok(claims) => {
            tracing::debug!(%path, user_id = %claims.sub, "session accepted");
            request.extensions_mut().insert(claims);
            next.run(request).await
        },
        Err(err) => {
            tracing::debug!(%path, error = %err, "invalid session cookie, redirecting to login");
            Redirect::to(LOGIN_PAGE).into_response()
        },
    }
}
