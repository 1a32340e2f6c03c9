//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A cache that never stores anything.
///
/// Used when Redis is not configured or unreachable at startup. Every read
/// is a miss, so all lookups fall through to the store.
pub struct NullCache {
    /// Set when standing in for a configured Redis that could not be reached.
    replaces_unreachable: bool,
}

impl NullCache {
    /// Creates a new NullCache instance for deployments without Redis.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self {
            replaces_unreachable: false,
        }
    }

    /// Creates a NullCache standing in for a configured but unreachable Redis.
    ///
    /// Requests keep being served from the store, but health reports the
    /// cache as failed for the rest of the process lifetime.
    pub fn unreachable() -> Self {
        debug!("Using NullCache in place of unreachable Redis");
        Self {
            replaces_unreachable: true,
        }
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: Option<u64>) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.replaces_unreachable
    }
}
