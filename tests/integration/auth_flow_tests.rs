// ==============================
// tests/integration/auth_flow_tests.rs
// ==============================
//! Register / login / logout through the HTTP surface
use crate::test_utils::{
    cookie_pair, post_form, post_json, read_json, send, set_cookie, setup_test_env,
};
use authgate_common::{ErrorResponse, LoginResponse, LogoutResponse, RegisterResponse};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let (app, state, _temp_dir) = setup_test_env();

    let response = send(
        &app,
        post_json("/register", json!({"username": "alice", "password": "secret1"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response).expect("register sets a cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=3600"));
    assert!(!cookie.contains("Secure"));

    let token = cookie_pair(&response)
        .unwrap()
        .trim_start_matches("auth_token=")
        .to_string();
    let claims = state.sessions.verify(&token).unwrap();
    assert_eq!(claims.username, "alice");

    let body: RegisterResponse = read_json(response).await;
    assert_eq!(
        body,
        RegisterResponse {
            success: true,
            username: "alice".to_string()
        }
    );
}

#[tokio::test]
async fn test_login_returns_redirect_and_same_identity() {
    let (app, state, _temp_dir) = setup_test_env();
    let credentials = json!({"username": "alice", "password": "secret1"});

    let registered = send(&app, post_json("/register", credentials.clone())).await;
    let register_token = cookie_pair(&registered).unwrap();
    let register_claims = state
        .sessions
        .verify(register_token.trim_start_matches("auth_token="))
        .unwrap();

    let response = send(&app, post_json("/login", credentials)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let login_token = cookie_pair(&response).unwrap();
    let login_claims = state
        .sessions
        .verify(login_token.trim_start_matches("auth_token="))
        .unwrap();
    assert_eq!(login_claims.sub, register_claims.sub);
    assert_eq!(login_claims.username, "alice");

    let body: LoginResponse = read_json(response).await;
    assert!(body.success);
    assert_eq!(body.username, "alice");
    assert_eq!(body.redirect, "/protected");
}

#[tokio::test]
async fn test_duplicate_register_is_400() {
    let (app, _state, _temp_dir) = setup_test_env();
    let credentials = json!({"username": "alice", "password": "secret1"});

    send(&app, post_json("/register", credentials.clone())).await;
    let response = send(&app, post_json("/register", credentials)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&response).is_none());

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.code, "USR_001");
}

#[tokio::test]
async fn test_register_validation_is_400() {
    let (app, _state, _temp_dir) = setup_test_env();

    for payload in [
        json!({"username": "al", "password": "secret1"}),
        json!({"username": "alice", "password": "12345"}),
        json!({"username": "alice"}),
        json!({"username": 42, "password": "secret1"}),
    ] {
        let response = send(&app, post_json("/register", payload.clone())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {payload}");
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.code, "VAL_001");
    }
}

#[tokio::test]
async fn test_login_failures_are_401() {
    let (app, _state, _temp_dir) = setup_test_env();
    send(
        &app,
        post_json("/register", json!({"username": "alice", "password": "secret1"})),
    )
    .await;

    let wrong = send(
        &app,
        post_json("/login", json!({"username": "alice", "password": "wrong"})),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let bad_password = send(
        &app,
        post_json("/login", json!({"username": "alice", "password": "secret2"})),
    )
    .await;
    assert_eq!(bad_password.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = read_json(bad_password).await;
    assert_eq!(body.code, "AUTH_001");

    let unknown = send(
        &app,
        post_json("/login", json!({"username": "mallory", "password": "secret1"})),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&unknown).is_none());
    let body: ErrorResponse = read_json(unknown).await;
    assert_eq!(body.code, "USR_002");
}

#[tokio::test]
async fn test_form_encoded_login() {
    let (app, _state, _temp_dir) = setup_test_env();
    send(
        &app,
        post_form("/register", "username=alice&password=secret1"),
    )
    .await;

    let response = send(&app, post_form("/login", "username=alice&password=secret1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(cookie_pair(&response).unwrap().starts_with("auth_token="));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (app, _state, _temp_dir) = setup_test_env();

    let response = send(&app, post_json("/logout", json!({}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with("auth_token=;"));
    assert!(cookie.contains("Max-Age=0"));

    let body: LogoutResponse = read_json(response).await;
    assert!(body.success);
}
