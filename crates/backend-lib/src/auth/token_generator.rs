// ============================
// crates/backend-lib/src/auth/token_generator.rs
// ============================
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
/** Secure secret generation
Used to mint an ephemeral signing secret when the deployment does not
configure one. Tokens signed with it die with the process. */
use rand::{rngs::OsRng, RngCore};

/// Default secret size in bytes (32 bytes = 256 bits of entropy)
const DEFAULT_SECRET_BYTES: usize = 32;

/** Generate a cryptographically secure random secret
# Returns
A base64 URL-safe encoded string without padding */
pub fn generate_signing_secret() -> String {
    generate_secure_token_with_size(DEFAULT_SECRET_BYTES)
}

/** Generate a cryptographically secure random token with specified size
# Arguments
* `bytes` - The size of the random token in bytes
# Returns
A base64 URL-safe encoded string without padding */
pub fn generate_secure_token_with_size(bytes: usize) -> String {
    let mut buffer = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}
