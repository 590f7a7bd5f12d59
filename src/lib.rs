//! # Shortner
//!
//! A small URL shortening service built with Axum and Redis: it turns a long
//! URL into a random 6-character alias, resolves aliases back with a `302`
//! redirect and lets clients look up or delete their mappings.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The mapping entity and the storage trait
//! - **Application Layer** ([`application`]) - Mapping lifecycle orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Storage
//!
//! Every mapping is written twice in one atomic `MSETNX`: `url:{original}` →
//! alias, and `alias:{alias}` → original. Resolution is a single key read.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! cargo run
//!
//! curl -X POST localhost:8000/api/v1/shortner/ \
//!      -H 'content-type: application/json' \
//!      -d '{"url": "https://www.rust-lang.org/learn"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ShortnerService;
    pub use crate::domain::entities::Mapping;
    pub use crate::domain::repositories::{InsertOutcome, MappingRepository};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
