//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router (full middleware stack) through
//! `tower::ServiceExt::oneshot`, so no TCP listener is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use maru_api::auth::jwt::{generate_access_token, JwtConfig};
use maru_api::config::ServerConfig;
use maru_api::router::build_app_router;
use maru_api::state::AppState;
use maru_db::models::user::{CreateUser, User};
use maru_db::repositories::UserRepo;

/// API key used for the server-to-server notification endpoint in tests.
pub const TEST_INTERNAL_API_KEY: &str = "test-internal-key";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        internal_api_key: Some(TEST_INTERNAL_API_KEY.to_string()),
        comment_max_depth: 2,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the production router construction so tests
/// exercise the same stack (CORS, request ID, timeout, tracing, panic
/// recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user row and return it.
pub async fn seed_user(pool: &PgPool, name: &str, email: &str, role: Option<&str>) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            image: None,
            role: role.map(str::to_string),
        },
    )
    .await
    .expect("failed to seed user")
}

/// Mint a valid access token for the given user.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt)
        .expect("failed to generate test token")
}

/// Send a request through the router. `token` adds a Bearer auth header,
/// `body` is serialized as JSON.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Send a POST with the internal API key header instead of a user token.
pub async fn post_internal(
    app: Router,
    uri: &str,
    api_key: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    let request = builder
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, "GET", uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", uri, token, Some(body)).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PATCH", uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, "DELETE", uri, token, None).await
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}
