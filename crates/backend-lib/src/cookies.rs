// ============================
// crates/backend-lib/src/cookies.rs
// ============================
//! Reading and writing the session cookie.
use std::time::Duration;

use authgate_common::AUTH_COOKIE_NAME;
use axum::http::{header, HeaderMap, HeaderValue};

use crate::error::AppError;

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(token: &str, max_age: Duration, secure: bool) -> Result<HeaderValue, AppError> {
    build(token, max_age.as_secs(), secure)
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
/// Attributes must match the ones used when setting it.
pub fn clear_session_cookie(secure: bool) -> Result<HeaderValue, AppError> {
    build("", 0, secure)
}

fn build(value: &str, max_age_secs: u64, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie =
        format!("{AUTH_COOKIE_NAME}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("invalid cookie value: {e}")))
}

/// Find a cookie by name across every `Cookie` header
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// The session token sent by the client, if any
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    read_cookie(headers, AUTH_COOKIE_NAME)
}
