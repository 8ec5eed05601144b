//! Dispatcher behaviour when no storage connection can be obtained.

mod common;

use std::time::{Duration, Instant};

use axum::http::{Method, StatusCode};
use common::{body_json, build_offline_app, get, send_json};
use serde_json::json;

#[tokio::test]
async fn unreachable_database_is_temporarily_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_offline_app(dir.path(), Duration::from_millis(300));

    let started = Instant::now();
    let response = get(app, "/qt").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(started.elapsed() < Duration::from_secs(10));
    let json = body_json(response).await;
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
    assert!(!json.to_string().contains("127.0.0.1"));
}

#[tokio::test]
async fn valid_write_without_connection_is_temporarily_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_offline_app(dir.path(), Duration::from_millis(300));

    let response = send_json(app, Method::POST, "/cat", json!({"name": "Stoics"})).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
