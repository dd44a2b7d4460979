// ============================
// crates/backend-lib/src/auth/users.rs
// ============================
//! Registration and credential checks against an injected store.
use std::sync::Arc;

use authgate_common::{Credentials, PublicUser};
use metrics::counter;
use zeroize::Zeroize;

use super::password::{hash_password_secure, verify_password, DEFAULT_HASH_COST};
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILURE, LOGIN_SUCCESS, USER_REGISTERED};
use crate::storage::{UserRecord, UserStore};
use crate::validation::{validate_password, validate_username};

/// Orchestrates validation, hashing and store access
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hash_cost: u8,
}

impl UserService {
    /// Create a service over `store` with the default hashing cost
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self::with_hash_cost(store, DEFAULT_HASH_COST)
    }

    /// Create a service with an explicit scrypt cost (`log_n`)
    pub fn with_hash_cost(store: Arc<dyn UserStore>, hash_cost: u8) -> Self {
        Self { store, hash_cost }
    }

    /// Register a new user and return its public projection
    pub async fn register(&self, credentials: Credentials) -> Result<PublicUser, AppError> {
        let Credentials { username, mut password } = credentials;
        let checked = validate_username(&username)
            .and_then(|_| validate_password(&password))
            .map(|_| ());
        if let Err(err) = checked {
            password.zeroize();
            return Err(err.into());
        }

        if self.store.find_by_username(&username).await?.is_some() {
            password.zeroize();
            return Err(AppError::Conflict(username));
        }

        let cost = self.hash_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password_secure(&mut password, cost))
                .await??;

        // the store re-checks uniqueness, so a concurrent registration still conflicts
        let record = self
            .store
            .insert(UserRecord::new(username, password_hash))
            .await?;

        counter!(USER_REGISTERED).increment(1);
        tracing::info!(user_id = %record.id, username = %record.username, "user registered");
        Ok(record.to_public())
    }

    /// Check credentials and return the matching user
    pub async fn login(&self, credentials: Credentials) -> Result<PublicUser, AppError> {
        let Credentials { username, mut password } = credentials;
        let checked = validate_username(&username)
            .and_then(|_| validate_password(&password))
            .map(|_| ());
        if let Err(err) = checked {
            password.zeroize();
            return Err(err.into());
        }

        let Some(record) = self.store.find_by_username(&username).await? else {
            password.zeroize();
            counter!(LOGIN_FAILURE).increment(1);
            tracing::info!(username = %username, "login for unknown user");
            return Err(AppError::NotFound(username));
        };

        let hash = record.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || {
            let ok = verify_password(&hash, &password);
            password.zeroize();
            ok
        })
        .await?;

        if !matches {
            counter!(LOGIN_FAILURE).increment(1);
            tracing::info!(username = %record.username, "login with wrong password");
            return Err(AppError::Auth);
        }

        counter!(LOGIN_SUCCESS).increment(1);
        tracing::info!(user_id = %record.id, username = %record.username, "user logged in");
        Ok(record.to_public())
    }
}
