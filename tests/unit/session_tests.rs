// ==============================
// tests/unit/session_tests.rs
// ==============================
//! Unit tests for session token issuance
use authgate_backend::auth::{SessionClaims, SessionIssuer, SESSION_TTL};
use authgate_backend::AppError;
use std::time::Duration;

#[test]
fn test_default_ttl_is_one_hour() {
    assert_eq!(SESSION_TTL, Duration::from_secs(3600));
    let issuer = SessionIssuer::new(b"unit-test-signing-secret");
    assert_eq!(issuer.ttl(), SESSION_TTL);
}

#[test]
fn test_token_decodes_to_issued_identity() {
    let issuer = SessionIssuer::new(b"unit-test-signing-secret");
    let token = issuer.issue("0b5c1d2e", "alice").unwrap();

    let SessionClaims { sub, username, iat, exp } = issuer.verify(&token).unwrap();
    assert_eq!(sub, "0b5c1d2e");
    assert_eq!(username, "alice");
    assert_eq!(exp - iat, 3600);
}

#[test]
fn test_token_past_expiry_fails() {
    let issuer = SessionIssuer::new(b"unit-test-signing-secret");
    let token = issuer
        .sign(&SessionClaims {
            sub: "0b5c1d2e".to_string(),
            username: "alice".to_string(),
            iat: 1_000,
            exp: 4_600,
        })
        .unwrap();

    assert!(matches!(issuer.verify(&token), Err(AppError::InvalidToken(_))));
}
