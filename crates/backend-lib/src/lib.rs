// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core functionality for the `AuthGate` credential server.

pub mod auth;
pub mod config;
pub mod cookies;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;
pub mod views;

use std::sync::Arc;

use crate::auth::{generate_signing_secret, SessionIssuer, UserService};
use crate::config::Settings;
use crate::storage::{FlatFileUserStore, UserStore};

pub use crate::error::AppError;
pub use crate::router::create_router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Registration and login
    pub users: Arc<UserService>,
    /// Session token issuer
    pub sessions: Arc<SessionIssuer>,
    /// Configuration settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create application state over an explicit store
    pub fn new(store: Arc<dyn UserStore>, config: &Settings) -> Self {
        let secret = match &config.jwt_secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::warn!(
                    "no jwt_secret configured, using a random one; sessions will not survive a restart"
                );
                generate_signing_secret()
            },
        };

        let users = Arc::new(UserService::with_hash_cost(store, config.hash_cost));
        let sessions = Arc::new(SessionIssuer::with_ttl(
            secret.as_bytes(),
            config.session_ttl(),
        ));

        Self {
            users,
            sessions,
            settings: Arc::new(config.clone()),
        }
    }

    /// Create application state backed by the flat-file store in `data_dir`
    pub fn from_settings(config: &Settings) -> anyhow::Result<Self> {
        let store = FlatFileUserStore::new(&config.data_dir)?;
        Ok(Self::new(Arc::new(store), config))
    }
}
