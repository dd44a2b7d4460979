// ==============================
// tests/integration/protected_route_tests.rs
// ==============================
//! The authentication gate and the HTML pages
use crate::test_utils::{cookie_pair, get, post_json, read_text, send, setup_test_env};
use axum::http::{header, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_protected_redirects_without_cookie() {
    let (app, _state, _temp_dir) = setup_test_env();

    let response = send(&app, get("/protected", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn test_protected_redirects_with_forged_cookie() {
    let (app, _state, _temp_dir) = setup_test_env();

    let response = send(&app, get("/protected", Some("auth_token=eyJhbGciOiJIUzI1NiJ9.e30.AAAA"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_then_protected_renders_user() {
    let (app, _state, _temp_dir) = setup_test_env();

    send(
        &app,
        post_json("/register", json!({"username": "alice", "password": "secret1"})),
    )
    .await;
    let login = send(
        &app,
        post_json("/login", json!({"username": "alice", "password": "secret1"})),
    )
    .await;
    let cookie = cookie_pair(&login).unwrap();

    let response = send(&app, get("/protected", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = read_text(response).await;
    assert!(html.contains("<strong>alice</strong>"));
}

#[tokio::test]
async fn test_index_reflects_login_state() {
    let (app, state, _temp_dir) = setup_test_env();

    let anonymous = read_text(send(&app, get("/", None)).await).await;
    assert!(anonymous.contains("login-form"));

    let token = state.sessions.issue("some-id", "bob").unwrap();
    let cookie = format!("auth_token={token}");
    let signed_in = read_text(send(&app, get("/", Some(&cookie))).await).await;
    assert!(signed_in.contains("Hello bob"));

    let stale = read_text(send(&app, get("/", Some("auth_token=garbage"))).await).await;
    assert!(stale.contains("login-form"));
}

#[tokio::test]
async fn test_health() {
    let (app, _state, _temp_dir) = setup_test_env();
    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, "Healthy");
}
