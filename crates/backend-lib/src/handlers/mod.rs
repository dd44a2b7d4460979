// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers.
pub mod auth;
pub mod credentials;
pub mod pages;

pub use auth::{login, logout, register};
pub use credentials::CredentialsForm;
pub use pages::{health, index, protected};
