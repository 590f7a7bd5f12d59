//! Repository trait for mapping storage.

use crate::domain::entities::Mapping;
use crate::error::AppError;
use async_trait::async_trait;

/// Result of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Both the primary record and the alias index were written.
    Inserted,
    /// The original URL already has an alias. Nothing was written.
    UrlTaken,
    /// Another URL already owns the alias. Nothing was written.
    AliasTaken,
}

/// Key-value storage for mappings.
///
/// Each mapping is held twice: under its original URL (primary record) and
/// under its alias (resolution index). Implementations must write and remove
/// both halves atomically.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedisMappingRepository`] - Redis
/// - [`crate::infrastructure::persistence::MemoryMappingRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Looks up the alias stored for an original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Mapping>, AppError>;

    /// Looks up the original URL an alias points to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Mapping>, AppError>;

    /// Writes the mapping only if neither its URL nor its alias is present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn insert_if_absent(&self, mapping: &Mapping) -> Result<InsertOutcome, AppError>;

    /// Removes the mapping and its alias index entry.
    ///
    /// Compare-and-delete: nothing is removed unless the URL still maps to
    /// `mapping.alias`. Returns `Ok(true)` if that exact pair was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn delete(&self, mapping: &Mapping) -> Result<bool, AppError>;

    /// Scans every stored mapping. Order is unspecified.
    ///
    /// Not used on the request path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn list(&self) -> Result<Vec<Mapping>, AppError>;

    /// Checks whether the store is reachable.
    async fn health_check(&self) -> bool;
}
