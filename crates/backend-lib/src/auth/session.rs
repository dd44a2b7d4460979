// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Stateless session tokens.
//!
//! A session is a signed JWT carrying the user id and name. Nothing is kept
//! server-side, so a token stays valid until it expires.
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::metrics::{SESSION_ISSUED, SESSION_REJECTED};

/// Session TTL (time to live)
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60); // 1 hour

/// Claims carried by every session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user id)
    pub sub: String,
    /// Username
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Mints and checks session tokens with a server secret
#[derive(Clone)]
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionIssuer {
    /// Create an issuer with the default one hour TTL
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, SESSION_TTL)
    }

    /// Create an issuer with a custom TTL
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Lifetime of freshly issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for a user
    pub fn issue(&self, user_id: &str, username: &str) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        let token = self.sign(&claims)?;

        counter!(SESSION_ISSUED).increment(1);
        tracing::debug!(user_id, username, exp = claims.exp, "session token issued");
        Ok(token)
    }

    /// Sign arbitrary claims with this issuer's key
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// Failures count towards `session.rejected`.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        self.peek(token).inspect_err(|err| {
            counter!(SESSION_REJECTED).increment(1);
            tracing::debug!(error = %err, "session token rejected");
        })
    }

    /// Same checks as [`verify`](Self::verify) without touching metrics, for
    /// pages that only look at who is signed in
    pub fn peek(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(AppError::from)
    }
}
