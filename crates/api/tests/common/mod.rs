#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use campus_api::app::build_app;
use campus_api::auth::jwt::{generate_access_token, JwtConfig};
use campus_api::config::ServerConfig;
use campus_api::state::AppState;
use campus_db::MemoryStore;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// A router over a fresh in-memory store with the default roles seeded.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = AppState::new(Arc::new(MemoryStore::new()), test_config());
        state.roles.seed_defaults().await.unwrap();
        let router = build_app(state.clone());
        Self { router, state }
    }

    /// Bearer token for `user_id` with the given account role.
    pub fn token(&self, user_id: &str, role: &str) -> String {
        generate_access_token(user_id, role, &self.state.config.jwt).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: &str) -> Response {
        self.send(request(Method::GET, uri, Some(token), None)).await
    }

    pub async fn post_json(&self, uri: &str, token: &str, body: serde_json::Value) -> Response {
        self.send(request(Method::POST, uri, Some(token), Some(body))).await
    }

    pub async fn post(&self, uri: &str, token: &str) -> Response {
        self.send(request(Method::POST, uri, Some(token), None)).await
    }

    pub async fn put_json(&self, uri: &str, token: &str, body: serde_json::Value) -> Response {
        self.send(request(Method::PUT, uri, Some(token), Some(body))).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response {
        self.send(request(Method::DELETE, uri, Some(token), None)).await
    }
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
