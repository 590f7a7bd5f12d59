mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use axum::http::StatusCode;
use common::{FailingRepository, create_test_state};
use shortner::api::handlers::health_handler;
use shortner::state::AppState;
use std::sync::Arc;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _) = create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (state, _) = create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["checks"].get("store").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded_when_store_unreachable() {
    let repository = Arc::new(FailingRepository::default());
    let state = AppState::new(repository.clone(), "http://8000");
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
    assert_eq!(json["checks"]["store"]["message"], "Store connection failed");

    // Reachability goes through PING only
    assert_eq!(repository.calls.load(Ordering::SeqCst), 0);
}
