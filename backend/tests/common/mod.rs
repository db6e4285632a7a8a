//! Shared helpers for driving the router in integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use inventory_tracker_backend::{
    config::{Config, ServerConfig, StoreBackend, StoreConfig},
    create_app,
    store::SharedStore,
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        store: StoreConfig {
            backend: StoreBackend::Memory,
            spreadsheet_id: String::new(),
            credentials: String::new(),
            request_timeout_secs: 5,
        },
    }
}

pub fn app_with(store: SharedStore) -> Router {
    create_app(AppState {
        store,
        config: Arc::new(test_config()),
    })
}

pub async fn respond(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// Send a request and return the status plus the raw body
pub async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = respond(app, request).await;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

/// Send a request and decode the body as JSON
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, request).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

pub fn post_raw(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}
