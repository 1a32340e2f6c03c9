//! Short URL creation and redirect resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::application::services::allocator::CodeAllocator;
use crate::domain::entities::{NewRedirectEvent, ShortenedUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::url_normalizer::normalize_url;

/// Coordinates the cache and the store for creating and resolving aliases.
///
/// The cache is consulted first and never written here; promotion into the
/// cache happens in [`crate::application::services::AnalyticsService`].
/// Cache transport errors are surfaced, never treated as misses.
pub struct LinkService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    allocator: CodeAllocator,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        allocation_attempts: usize,
    ) -> Self {
        Self {
            allocator: CodeAllocator::new(repository.clone(), allocation_attempts),
            repository,
            cache,
        }
    }

    /// Creates (or fetches) the short code for a long URL.
    ///
    /// # Flow
    ///
    /// 1. Normalize the URL
    /// 2. Cache hit on the long URL: return the cached code, store untouched
    /// 3. Cache miss: delegate to the allocator
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is invalid.
    /// Returns [`AppError::Unavailable`] on cache transport errors.
    /// Returns [`AppError::Internal`] on store errors or allocation exhaustion.
    pub async fn create_short_url(&self, long_url: &str) -> Result<ShortenedUrl, AppError> {
        let long_url = normalize_url(long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(short_code) = self.cache.get(&long_url).await? {
            debug!("Cache HIT for {}", long_url);
            return Ok(ShortenedUrl {
                long_url,
                short_code,
            });
        }

        debug!("Cache MISS for {}", long_url);
        let mapping = self.allocator.allocate(&long_url).await?;

        Ok(mapping.into())
    }

    /// Resolves a short code to its long URL and records the visit.
    ///
    /// On a cache hit the visit is written separately. On a miss the lookup
    /// and the visit are one store transaction, so an unknown alias never
    /// gets a visit recorded.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias does not exist.
    /// Returns [`AppError::Unavailable`] on cache transport errors.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn resolve_short_url(&self, visit: NewRedirectEvent) -> Result<String, AppError> {
        let short_code = visit.short_code.clone();

        if let Some(long_url) = self.cache.get(&short_code).await? {
            debug!("Cache HIT for {}", short_code);
            self.repository.record_visit(visit).await?;
            return Ok(long_url);
        }

        debug!("Cache MISS for {}", short_code);
        self.repository
            .resolve_and_record(&short_code, visit)
            .await?
            .map(|mapping| mapping.long_url)
            .ok_or_else(|| AppError::not_found("Alias not found", json!({ "short_code": short_code })))
    }
}
