// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};
use zeroize::Zeroize;

use crate::error::AppError;

/// Default work factor: scrypt `log_n`, so N = 2^10
pub const DEFAULT_HASH_COST: u8 = 10;

/// scrypt block size
const BLOCK_SIZE: u32 = 8;

/// scrypt parallelism
const PARALLELISM: u32 = 1;

/// Hash a password using scrypt with a fresh random salt
pub fn hash_password(plain: &str, cost: u8) -> Result<String, AppError> {
    let params = Params::new(cost, BLOCK_SIZE, PARALLELISM, Params::RECOMMENDED_LEN)
        .map_err(|e| AppError::Internal(format!("invalid scrypt cost {cost}: {e}")))?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a hash. Malformed hashes never verify.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Securely hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String, cost: u8) -> Result<String, AppError> {
    let hash = hash_password(plain, cost);
    plain.zeroize();
    hash
}
