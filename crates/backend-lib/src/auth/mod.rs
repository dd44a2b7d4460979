// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.
pub mod password;
pub mod session;
pub mod token_generator;
pub mod users;

pub use password::{hash_password, hash_password_secure, verify_password, DEFAULT_HASH_COST};
pub use session::{SessionClaims, SessionIssuer, SESSION_TTL};
pub use token_generator::generate_signing_secret;
pub use users::UserService;
