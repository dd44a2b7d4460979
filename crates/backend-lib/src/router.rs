// ============================
// crates/backend-lib/src/router.rs
// ============================
//! Route table and HTTP layers.
use std::sync::Arc;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Settings;
use crate::handlers;
use crate::middleware::require_auth;
use crate::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/protected", get(handlers::protected))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let router = Router::new()
        .route("/", get(handlers::index))
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/logout", post(handlers::logout))
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http());

    let router = match cors_layer(&state.settings) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

/// CORS for the configured browser origin, with cookies allowed
fn cors_layer(settings: &Settings) -> Option<CorsLayer> {
    let origin = settings.cors_origin.as_deref()?;
    let origin = match HeaderValue::from_str(origin) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(origin, error = %err, "ignoring unusable CORS origin");
            return None;
        },
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true),
    )
}
