//! `/health` reporting without a reachable database.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, build_offline_app, get};

#[tokio::test]
async fn health_is_degraded_when_database_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_offline_app(dir.path(), Duration::from_millis(300));

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}
