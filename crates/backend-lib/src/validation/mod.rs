// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Credential shape validation.
//!
//! Pure functions only: nothing here touches the store or hashes anything.

use serde_json::Value;
use thiserror::Error;

/// Minimum username length, in UTF-16 code units
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length, in UTF-16 code units
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Possible validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username and password are required (missing `{0}`)")]
    MissingField(&'static str),

    #[error("Field `{0}` must be a string")]
    NotAString(&'static str),

    #[error("Username must be at least {min} characters long")]
    UsernameTooShort { min: usize },

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a username
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    if username.encode_utf16().count() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort {
            min: MIN_USERNAME_LENGTH,
        });
    }
    Ok(username)
}

/// Validate a password
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(password)
}

/// Pull a string field out of a loosely typed request value.
///
/// A missing field and an explicit `null` are both reported as missing; any
/// other non-string JSON value is rejected as not a string.
pub fn require_string(field: &'static str, value: Option<Value>) -> ValidationResult<String> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::NotAString(field)),
    }
}
