//! Mapping storage backends.
//!
//! - [`RedisMappingRepository`] - production key-value store
//! - [`MemoryMappingRepository`] - in-process store for development and tests

mod memory_mapping_repository;
mod redis_mapping_repository;

pub use memory_mapping_repository::MemoryMappingRepository;
pub use redis_mapping_repository::RedisMappingRepository;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::MappingRepository;

/// Opens the storage backend selected by `STORE_BACKEND`.
///
/// # Errors
///
/// Returns an error if Redis is selected and cannot be reached.
pub async fn connect(config: &Config) -> Result<Arc<dyn MappingRepository>> {
    match config.store_backend {
        StoreBackend::Redis => {
            let repository =
                RedisMappingRepository::connect(&config.redis_url, config.store_connect_retries)
                    .await
                    .context("Failed to connect to Redis")?;
            Ok(Arc::new(repository))
        }
        StoreBackend::Memory => {
            tracing::warn!("STORE_BACKEND=memory: mappings will not survive a restart");
            Ok(Arc::new(MemoryMappingRepository::new()))
        }
    }
}
