//! Short code allocation with collision retry.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Default number of insert attempts before giving up.
pub const DEFAULT_ALLOCATION_ATTEMPTS: usize = 5;

/// Allocates globally unique short codes for normalized long URLs.
///
/// Idempotent on the long URL: an existing mapping is returned unchanged.
/// Otherwise random candidates are inserted until the store accepts one or
/// the attempt budget runs out.
pub struct CodeAllocator {
    repository: Arc<dyn UrlRepository>,
    max_attempts: usize,
}

impl CodeAllocator {
    /// Creates a new allocator.
    ///
    /// `max_attempts` is clamped to at least one attempt.
    pub fn new(repository: Arc<dyn UrlRepository>, max_attempts: usize) -> Self {
        Self {
            repository,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the mapping for `long_url`, creating one if needed.
    ///
    /// `long_url` must already be normalized.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when every attempt collided
    /// (allocation exhausted). Short code conflicts are never returned.
    /// Store errors propagate unchanged.
    pub async fn allocate(&self, long_url: &str) -> Result<UrlMapping, AppError> {
        if let Some(existing) = self.repository.find_by_long_url(long_url).await? {
            debug!("Reusing short code {} for {}", existing.short_code, long_url);
            return Ok(existing);
        }

        for attempt in 1..=self.max_attempts {
            let candidate = NewUrlMapping {
                long_url: long_url.to_string(),
                short_code: generate_code(),
            };

            match self.repository.create(candidate).await {
                Ok(mapping) => return Ok(mapping),
                Err(e) if e.is_conflict() => {
                    debug!(
                        "Short code collision (attempt {}/{})",
                        attempt, self.max_attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            "Short code allocation exhausted after {} attempts for {}",
            self.max_attempts, long_url
        );

        Err(AppError::internal(
            "Failed to allocate unique short code",
            json!({ "reason": "allocation exhausted", "attempts": self.max_attempts }),
        ))
    }
}
