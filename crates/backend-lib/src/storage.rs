// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Credential storage abstraction with flat-file and in-memory implementations.
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use authgate_common::PublicUser;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use serde::{Deserialize, Serialize};
use tokio::{fs as tokio_fs, sync::Mutex};

use crate::error::AppError;

/// File holding every user record, relative to the data directory
pub const USERS_FILE: &str = "users.json";

/// A stored user. Immutable once inserted.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Opaque unique identifier (UUID v4)
    pub id: String,
    /// Unique account name
    pub username: String,
    /// PHC-formatted salted hash
    pub password_hash: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build a fresh record with a new random id
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Projection safe to hand to clients
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Trait for credential store backends
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look a user up by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError>;

    /// Insert a new record, failing with `AppError::Conflict` if the username exists
    async fn insert(&self, record: UserRecord) -> Result<UserRecord, AppError>;
}

/// Flat-file implementation of the `UserStore` trait.
///
/// All records live in one JSON document that is rewritten on every insert.
/// The in-memory copy is authoritative for reads; the mutex keeps the
/// uniqueness check and the write together.
#[derive(Clone)]
pub struct FlatFileUserStore {
    root: PathBuf,
    records: Arc<Mutex<Vec<UserRecord>>>,
}

impl FlatFileUserStore {
    /// Open (or create) a store rooted at `root`, loading any existing records
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;

        let path = root.join(USERS_FILE);
        let records: Vec<UserRecord> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };

        tracing::info!(path = %path.display(), users = records.len(), "user store opened");

        Ok(Self {
            root,
            records: Arc::new(Mutex::new(records)),
        })
    }

    /// Path of the backing JSON document
    pub fn path(&self) -> PathBuf {
        self.root.join(USERS_FILE)
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn persist(&self, records: &[UserRecord]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.root.join(format!("{USERS_FILE}.tmp"));
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, self.path()).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for FlatFileUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|r| r.username == username).cloned())
    }

    async fn insert(&self, record: UserRecord) -> Result<UserRecord, AppError> {
        let mut records = self.records.lock().await;

        if records.iter().any(|r| r.username == record.username) {
            return Err(AppError::Conflict(record.username));
        }

        // write first so a failed write leaves memory and disk in agreement
        let mut next = records.clone();
        next.push(record.clone());
        self.persist(&next).await?;
        *records = next;

        tracing::debug!(user_id = %record.id, username = %record.username, "user record stored");
        Ok(record)
    }
}

/// Process-local store with no persistence
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    records: Arc<DashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.records.get(username).map(|r| r.value().clone()))
    }

    async fn insert(&self, record: UserRecord) -> Result<UserRecord, AppError> {
        match self.records.entry(record.username.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(record.username)),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            },
        }
    }
}
