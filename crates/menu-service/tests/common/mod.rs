//! Shared helpers for integration tests.
//!
//! Builds the full router against the in-memory store and a wiremock
//! authority serving the fixed test key set, so tokens signed by
//! `menu-test-utils` genuinely verify end to end.

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use menu_service::config::Config;
use menu_service::routes::{build_routes, AppState};
use menu_service::store::MemoryDrinkStore;
use menu_test_utils::test_jwks_json;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const JWKS_PATH: &str = "/.well-known/jwks.json";

/// Start a mock authority serving the test key set at the standard path.
pub async fn start_jwks_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_jwks_json()))
        .mount(&server)
        .await;

    server
}

/// Configuration pointing the verifier at the given JWKS URL.
///
/// The expected issuer and audience match the token builder defaults.
pub fn test_config(jwks_url: &str) -> Config {
    let vars = HashMap::from([
        (
            "DATABASE_URL".to_string(),
            "postgresql://localhost/menu_test".to_string(),
        ),
        ("AUTH_DOMAIN".to_string(), "menu.test".to_string()),
        ("AUTH_AUDIENCE".to_string(), "drinks".to_string()),
        ("AUTH_JWKS_URL".to_string(), jwks_url.to_string()),
        ("JWKS_TIMEOUT_SECONDS".to_string(), "2".to_string()),
    ]);

    Config::from_vars(&vars).expect("test config should load")
}

/// Build the application against an in-memory store.
///
/// Returns the store handle too so tests can seed records directly.
pub fn build_app(jwks_server: &MockServer) -> (Router, Arc<MemoryDrinkStore>) {
    let jwks_url = format!("{}{}", jwks_server.uri(), JWKS_PATH);
    build_app_with_jwks_url(&jwks_url)
}

/// Build the application against an explicit JWKS URL, for tests that
/// exercise authority failures.
pub fn build_app_with_jwks_url(jwks_url: &str) -> (Router, Arc<MemoryDrinkStore>) {
    let store = Arc::new(MemoryDrinkStore::new());
    let state = Arc::new(AppState {
        store: store.clone(),
        config: test_config(jwks_url),
    });
    (build_routes(state), store)
}

/// Send a request and return the status plus the parsed body.
///
/// Non-JSON bodies come back as a JSON string value.
pub async fn request(
    app: &Router,
    http_method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(http_method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    send(app, req).await
}

/// Send a request with a verbatim Authorization header value.
pub async fn request_with_auth_header(
    app: &Router,
    uri: &str,
    auth_header: &str,
) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, auth_header)
        .body(Body::empty())
        .expect("request should build");

    send(app, req).await
}

/// Send a request whose body is a raw string rather than valid JSON.
pub async fn request_raw_body(
    app: &Router,
    http_method: Method,
    uri: &str,
    token: &str,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method(http_method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");

    send(app, req).await
}

/// Drive a built request through the router and decode the response.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should be handled");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should read")
        .to_bytes();

    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, body)
}

/// Assert the boundary error shape: `success` false and `error` matching
/// the response status.
pub fn assert_error_body(body: &serde_json::Value, status: StatusCode) {
    assert_eq!(body["success"], false, "error body: {body}");
    assert_eq!(body["error"], status.as_u16(), "error body: {body}");
    assert!(
        body["message"].is_string(),
        "error body should carry a message: {body}"
    );
}
