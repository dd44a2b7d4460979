// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between `AuthGate` clients and the server.
//! This module defines the JSON bodies exchanged on the auth routes.

use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the session token
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Where clients are sent after a successful login
pub const PROTECTED_PATH: &str = "/protected";

/// Credentials submitted to `/login` and `/register`
/// # Fields
/// * `username` - Unique account name (min 3 chars)
/// * `password` - Plaintext password (min 6 chars), hashed server-side
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Public projection of a stored user. Never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
}

/// Body returned by `POST /register`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterResponse {
    pub success: bool,
    pub username: String,
}

/// Body returned by `POST /login`
/// # Fields
/// * `redirect` - Path the client should navigate to next
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
    pub username: String,
    pub redirect: String,
}

/// Body returned by `POST /logout`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Body of every error response
/// # Fields
/// * `error` - Human readable message
/// * `code` - Stable machine readable code (e.g. `VAL_001`)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
