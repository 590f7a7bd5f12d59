//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortnerService;
use crate::domain::repositories::MappingRepository;

/// Application state.
///
/// The store handle is opened once in [`crate::server::run`], shared by
/// reference through this struct, and released when the server shuts down.
#[derive(Clone)]
pub struct AppState {
    pub shortner_service: Arc<ShortnerService>,
}

impl AppState {
    pub fn new(repository: Arc<dyn MappingRepository>, short_url_base: impl Into<String>) -> Self {
        Self {
            shortner_service: Arc::new(ShortnerService::new(repository, short_url_base)),
        }
    }
}
