//! Mapping lifecycle: create, look up, delete and resolve.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::Mapping;
use crate::domain::repositories::{InsertOutcome, MappingRepository};
use crate::error::AppError;
use crate::utils::alias_generator::generate_alias;

/// Attempts at finding a free alias before giving up.
const MAX_ALIAS_ATTEMPTS: usize = 10;

/// Service orchestrating the mapping lifecycle on top of a [`MappingRepository`].
///
/// Holds no state of its own besides the repository handle and the base
/// used to render short URLs.
pub struct ShortnerService {
    repository: Arc<dyn MappingRepository>,
    short_url_base: String,
}

impl ShortnerService {
    /// Creates a new service.
    pub fn new(repository: Arc<dyn MappingRepository>, short_url_base: impl Into<String>) -> Self {
        Self {
            repository,
            short_url_base: short_url_base.into(),
        }
    }

    /// Shortens `original_url`.
    ///
    /// The duplicate check and the write are one atomic conditional insert, so
    /// two concurrent requests for the same URL yield one success and one
    /// conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the URL was already shortened.
    /// Returns [`AppError::Internal`] on store errors or if no free alias was
    /// found after repeated collisions.
    pub async fn create(&self, original_url: &str) -> Result<Mapping, AppError> {
        for _ in 0..MAX_ALIAS_ATTEMPTS {
            let mapping = Mapping::new(original_url, generate_alias());

            match self.repository.insert_if_absent(&mapping).await? {
                InsertOutcome::Inserted => {
                    info!(alias = %mapping.alias, "mapping created");
                    return Ok(mapping);
                }
                InsertOutcome::UrlTaken => {
                    return Err(AppError::conflict("This url was already shortened."));
                }
                InsertOutcome::AliasTaken => {
                    warn!(alias = %mapping.alias, "alias collision, regenerating");
                }
            }
        }

        Err(AppError::internal(json!({
            "reason": "Too many alias collisions",
            "attempts": MAX_ALIAS_ATTEMPTS,
        })))
    }

    /// Returns the mapping stored for `original_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the URL was never shortened.
    pub async fn find_by_original_url(&self, original_url: &str) -> Result<Mapping, AppError> {
        self.repository
            .find_by_original_url(original_url)
            .await?
            .ok_or_else(|| AppError::not_found("Shortened URL was not found."))
    }

    /// Deletes the mapping stored for `original_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if there is nothing to delete.
    pub async fn delete(&self, original_url: &str) -> Result<Mapping, AppError> {
        let not_found = || AppError::not_found("Shortened URL doesn't exist.");

        let mapping = self
            .repository
            .find_by_original_url(original_url)
            .await?
            .ok_or_else(not_found)?;

        // A concurrent delete, or delete and re-create, may win after the lookup
        if !self.repository.delete(&mapping).await? {
            return Err(not_found());
        }

        info!(alias = %mapping.alias, "mapping deleted");
        Ok(mapping)
    }

    /// Returns the original URL `alias` points to.
    ///
    /// Single indexed lookup; the number of stored mappings does not matter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping uses `alias`.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        let mapping = self
            .repository
            .find_by_alias(alias)
            .await?
            .ok_or_else(|| AppError::not_found("This shortened URL is invalid or is not found."))?;

        debug!(alias, "alias resolved");
        Ok(mapping.original_url)
    }

    /// Returns every stored mapping, sorted by original URL.
    ///
    /// Full scan of the store; meant for administration only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list(&self) -> Result<Vec<Mapping>, AppError> {
        let mut mappings = self.repository.list().await?;
        mappings.sort_by(|a, b| a.original_url.cmp(&b.original_url));
        Ok(mappings)
    }

    /// Renders the short URL for `alias`.
    pub fn short_url(&self, alias: &str) -> String {
        format!("{}/{}", self.short_url_base.trim_end_matches('/'), alias)
    }

    /// Checks whether the underlying store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use crate::utils::alias_generator::is_valid_alias;

    fn service(repo: MockMappingRepository) -> ShortnerService {
        ShortnerService::new(Arc::new(repo), "http://8000")
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut repo = MockMappingRepository::new();
        repo.expect_insert_if_absent()
            .withf(|m| m.original_url == "https://example.com" && is_valid_alias(&m.alias))
            .times(1)
            .returning(|_| Ok(InsertOutcome::Inserted));

        let mapping = service(repo).create("https://example.com").await.unwrap();

        assert_eq!(mapping.original_url, "https://example.com");
        assert!(is_valid_alias(&mapping.alias));
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let mut repo = MockMappingRepository::new();
        repo.expect_insert_if_absent()
            .times(1)
            .returning(|_| Ok(InsertOutcome::UrlTaken));

        let result = service(repo).create("https://example.com").await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_retries_on_alias_collision() {
        let mut repo = MockMappingRepository::new();
        let mut attempts = 0;
        repo.expect_insert_if_absent().times(3).returning(move |_| {
            attempts += 1;
            if attempts < 3 {
                Ok(InsertOutcome::AliasTaken)
            } else {
                Ok(InsertOutcome::Inserted)
            }
        });

        let result = service(repo).create("https://example.com").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_gives_up_after_max_collisions() {
        let mut repo = MockMappingRepository::new();
        repo.expect_insert_if_absent()
            .times(MAX_ALIAS_ATTEMPTS)
            .returning(|_| Ok(InsertOutcome::AliasTaken));

        let result = service(repo).create("https://example.com").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_propagates_store_error() {
        let mut repo = MockMappingRepository::new();
        repo.expect_insert_if_absent()
            .times(1)
            .returning(|_| Err(AppError::internal(json!({ "reason": "down" }))));

        let result = service(repo).create("https://example.com").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_find_by_original_url() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_original_url()
            .withf(|url| url == "https://example.com")
            .returning(|url| Ok(Some(Mapping::new(url, "aB3xY9"))));

        let mapping = service(repo)
            .find_by_original_url("https://example.com")
            .await
            .unwrap();

        assert_eq!(mapping.alias, "aB3xY9");
    }

    #[tokio::test]
    async fn test_find_by_original_url_not_found() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_original_url().returning(|_| Ok(None));

        let result = service(repo).find_by_original_url("https://example.com").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_original_url()
            .returning(|url| Ok(Some(Mapping::new(url, "aB3xY9"))));
        repo.expect_delete()
            .withf(|m| m.alias == "aB3xY9")
            .times(1)
            .returning(|_| Ok(true));

        let deleted = service(repo).delete("https://example.com").await.unwrap();

        assert_eq!(deleted.alias, "aB3xY9");
    }

    #[tokio::test]
    async fn test_delete_missing_does_not_mutate() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_original_url().returning(|_| Ok(None));
        repo.expect_delete().times(0);

        let result = service(repo).delete("https://example.com").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_lost_race_is_not_found() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_original_url()
            .returning(|url| Ok(Some(Mapping::new(url, "aB3xY9"))));
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let result = service(repo).delete("https://example.com").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_uses_alias_index() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_alias()
            .withf(|alias| alias == "aB3xY9")
            .times(1)
            .returning(|alias| Ok(Some(Mapping::new("https://example.com/target", alias))));
        repo.expect_list().times(0);

        let url = service(repo).resolve("aB3xY9").await.unwrap();

        assert_eq!(url, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_unknown_alias() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_alias().returning(|_| Ok(None));

        let result = service(repo).resolve("zzzzzz").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let mut repo = MockMappingRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![
                Mapping::new("https://b.example", "bbbbbb"),
                Mapping::new("https://a.example", "aaaaaa"),
            ])
        });

        let all = service(repo).list().await.unwrap();

        assert_eq!(all[0].original_url, "https://a.example");
        assert_eq!(all[1].original_url, "https://b.example");
    }

    #[test]
    fn test_short_url_rendering() {
        let svc = service(MockMappingRepository::new());
        assert_eq!(svc.short_url("aB3xY9"), "http://8000/aB3xY9");

        let svc = ShortnerService::new(
            Arc::new(MockMappingRepository::new()),
            "https://s.example.com/",
        );
        assert_eq!(svc.short_url("aB3xY9"), "https://s.example.com/aB3xY9");
    }
}
