#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use shortner::domain::entities::Mapping;
use shortner::domain::repositories::{InsertOutcome, MappingRepository};
use shortner::error::AppError;
use shortner::infrastructure::persistence::MemoryMappingRepository;
use shortner::routes::app_router;
use shortner::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const SHORTNER: &str = "/api/v1/shortner/";

pub fn create_test_state() -> (AppState, Arc<MemoryMappingRepository>) {
    let repository = Arc::new(MemoryMappingRepository::new());
    let state = AppState::new(repository.clone(), "http://8000");
    (state, repository)
}

pub fn create_test_server() -> (TestServer, Arc<MemoryMappingRepository>) {
    let (state, repository) = create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();
    (server, repository)
}

/// Shortens `url` through the API and returns the alias.
pub async fn shorten(server: &TestServer, url: &str) -> String {
    let response = server.post(SHORTNER).json(&json!({ "url": url })).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    alias_of(&body)
}

/// Extracts the alias from a `{ data: { shortened_url } }` envelope.
pub fn alias_of(body: &serde_json::Value) -> String {
    body["data"]["shortened_url"]
        .as_str()
        .unwrap()
        .strip_prefix("http://8000/")
        .unwrap()
        .to_string()
}

/// Repository that fails every call and counts how often it was touched.
#[derive(Default)]
pub struct FailingRepository {
    pub calls: AtomicUsize,
}

impl FailingRepository {
    fn fail(&self) -> AppError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        AppError::internal(json!({ "reason": "connection refused" }))
    }
}

#[async_trait]
impl MappingRepository for FailingRepository {
    async fn find_by_original_url(&self, _: &str) -> Result<Option<Mapping>, AppError> {
        Err(self.fail())
    }

    async fn find_by_alias(&self, _: &str) -> Result<Option<Mapping>, AppError> {
        Err(self.fail())
    }

    async fn insert_if_absent(&self, _: &Mapping) -> Result<InsertOutcome, AppError> {
        Err(self.fail())
    }

    async fn delete(&self, _: &Mapping) -> Result<bool, AppError> {
        Err(self.fail())
    }

    async fn list(&self) -> Result<Vec<Mapping>, AppError> {
        Err(self.fail())
    }

    async fn health_check(&self) -> bool {
        false
    }
}
