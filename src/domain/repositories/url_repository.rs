//! Repository trait for URL mappings and visit recording.

use crate::domain::entities::{NewRedirectEvent, NewUrlMapping, RedirectEvent, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistent store for mappings and redirect events.
///
/// The store is the source of truth; the cache is only a projection of it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new mapping.
    ///
    /// If a mapping for the same long URL was inserted concurrently, that
    /// mapping is returned instead (first writer wins).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Finds the mapping for a normalized long URL.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds the mapping for a short code.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Looks up a short code and records the visit in one transaction.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(mapping))` if the code exists; the visit was committed
    /// - `Ok(None)` if the code does not exist; nothing was written
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors; the transaction is
    /// rolled back.
    async fn resolve_and_record(
        &self,
        short_code: &str,
        visit: NewRedirectEvent,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Records a visit outside of any transaction.
    ///
    /// Used when the alias was resolved from cache.
    async fn record_visit(&self, visit: NewRedirectEvent) -> Result<RedirectEvent, AppError>;

    /// Checks that the store answers queries.
    async fn health_check(&self) -> bool;
}
