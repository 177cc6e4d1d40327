//! Repository trait for the URL registry.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for the source of truth behind every short code.
///
/// All methods report connectivity or query failures as
/// [`AppError::StoreUnavailable`]; callers treat them as fatal.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a record without a short code and returns the assigned id.
    ///
    /// Ids are positive and strictly increasing.
    async fn insert(&self, long_url: &str) -> Result<i64, AppError>;

    /// Attaches the short code derived from `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this id.
    async fn update_code(&self, id: i64, short_code: &str) -> Result<(), AppError>;

    /// Finds the record carrying `short_code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Counts records that have a short code.
    async fn count(&self) -> Result<i64, AppError>;

    /// Removes a record. Used to roll back a create that failed after insert.
    ///
    /// Returns `Ok(true)` if a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Deletes code-less records created before `older_than`.
    ///
    /// Returns the number of rows removed.
    async fn prune_orphans(&self, older_than: DateTime<Utc>) -> Result<u64, AppError>;
}
