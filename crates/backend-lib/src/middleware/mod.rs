// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the `AuthGate` server.

pub mod auth_gate;

pub use auth_gate::require_auth;
