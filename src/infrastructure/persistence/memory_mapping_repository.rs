//! In-process mapping repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Mapping;
use crate::domain::repositories::{InsertOutcome, MappingRepository};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    by_url: HashMap<String, String>,
    by_alias: HashMap<String, String>,
}

/// A [`MappingRepository`] that keeps everything in memory.
///
/// Used for local development (`STORE_BACKEND=memory`) and tests. Both
/// tables live behind one lock, so inserts and deletes are atomic exactly as
/// with the Redis backend. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryMappingRepository {
    tables: RwLock<Tables>,
}

impl MemoryMappingRepository {
    pub fn new() -> Self {
        debug!("Using in-memory mapping store");
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Mapping>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables
            .by_url
            .get(original_url)
            .map(|alias| Mapping::new(original_url, alias.as_str())))
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Mapping>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables
            .by_alias
            .get(alias)
            .map(|url| Mapping::new(url.as_str(), alias)))
    }

    async fn insert_if_absent(&self, mapping: &Mapping) -> Result<InsertOutcome, AppError> {
        let mut tables = self.tables.write().await;

        if tables.by_url.contains_key(&mapping.original_url) {
            return Ok(InsertOutcome::UrlTaken);
        }
        if tables.by_alias.contains_key(&mapping.alias) {
            return Ok(InsertOutcome::AliasTaken);
        }

        tables
            .by_url
            .insert(mapping.original_url.clone(), mapping.alias.clone());
        tables
            .by_alias
            .insert(mapping.alias.clone(), mapping.original_url.clone());

        Ok(InsertOutcome::Inserted)
    }

    async fn delete(&self, mapping: &Mapping) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        // Only the exact pair; the URL may have been re-shortened since it was read
        if tables.by_url.get(&mapping.original_url) != Some(&mapping.alias) {
            return Ok(false);
        }

        tables.by_url.remove(&mapping.original_url);
        tables.by_alias.remove(&mapping.alias);

        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Mapping>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables
            .by_url
            .iter()
            .map(|(url, alias)| Mapping::new(url.as_str(), alias.as_str()))
            .collect())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
