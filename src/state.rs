//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    AnalyticsService, DEFAULT_ALLOCATION_ATTEMPTS, DEFAULT_PROMOTION_THRESHOLD, LinkService,
};
use crate::config::Config;
use crate::domain::repositories::{AnalyticsRepository, UrlRepository};
use crate::infrastructure::cache::CacheService;

/// Tunables for the services built into [`AppState`].
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub allocation_attempts: usize,
    pub promotion_threshold: i64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            allocation_attempts: DEFAULT_ALLOCATION_ATTEMPTS,
            promotion_threshold: DEFAULT_PROMOTION_THRESHOLD,
        }
    }
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            allocation_attempts: config.allocation_attempts,
            promotion_threshold: config.promotion_threshold,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub analytics_service: Arc<AnalyticsService>,
    /// Used directly by the health check.
    pub url_repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
    pub base_url: String,
}

impl AppState {
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        analytics_repository: Arc<dyn AnalyticsRepository>,
        cache: Arc<dyn CacheService>,
        settings: ServiceSettings,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            url_repository.clone(),
            cache.clone(),
            settings.allocation_attempts,
        ));
        let analytics_service = Arc::new(AnalyticsService::new(
            analytics_repository,
            cache.clone(),
            settings.promotion_threshold,
        ));

        Self {
            link_service,
            analytics_service,
            url_repository,
            cache,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/s/{}", self.base_url, short_code)
    }
}
