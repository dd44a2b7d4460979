// ============================
// crates/backend-lib/src/handlers/credentials.rs
// ============================
//! Credential payload extraction.
//!
//! Accepts JSON or urlencoded forms and reports shape problems as
//! `ValidationError`s instead of axum's default rejections.
use authgate_common::Credentials;
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::validation::{require_string, ValidationError};

/// Loosely typed body so non-string fields can be told apart from missing ones
#[derive(Debug, Default, Deserialize)]
struct RawCredentials {
    #[serde(default)]
    username: Option<Value>,
    #[serde(default)]
    password: Option<Value>,
}

/// `{username, password}` pulled from the request body
#[derive(Debug)]
pub struct CredentialsForm(pub Credentials);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

impl<S> FromRequest<S> for CredentialsForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let raw = if is_form(&req) {
            let Form(raw) = Form::<RawCredentials>::from_request(req, state)
                .await
                .map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
            raw
        } else {
            let Json(raw) = Json::<RawCredentials>::from_request(req, state)
                .await
                .map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
            raw
        };

        let username = require_string("username", raw.username)?;
        let password = require_string("password", raw.password)?;
        Ok(Self(Credentials { username, password }))
    }
}
