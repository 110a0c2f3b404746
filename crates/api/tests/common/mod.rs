#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tomato_api::config::{ServerConfig, StoreBackend};
use tomato_api::router::build_app_router;
use tomato_api::state::AppState;
use tomato_core::memory_store::MemoryTomatoStore;
use tomato_core::service::TomatoService;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreBackend::Memory,
        database_max_connections: 1,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Clones of the returned router share the same store, so a test can send
/// several requests and observe earlier writes.
pub fn build_test_app() -> Router {
    let config = test_config();
    let service = TomatoService::new(Arc::new(MemoryTomatoStore::new()));
    let state = AppState::new(service, config.clone());
    build_app_router(state, &config)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PUT, uri, body)).await
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a tomato through the API and return its id.
pub async fn create_tomato(app: &Router, body: serde_json::Value) -> i64 {
    let response = post_json(app, "/tomatoes", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["_id"].as_i64().unwrap()
}
