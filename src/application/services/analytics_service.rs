//! Redirect analytics and hot-alias promotion.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{DailyStats, LinkAnalytics, MonthlyStats, UserAgentStats};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Default visit count at which an alias is promoted into the cache.
pub const DEFAULT_PROMOTION_THRESHOLD: i64 = 5;

/// Reads visit aggregates and promotes hot aliases into the cache.
///
/// Promotion writes both directions (long URL to code, code to long URL) so
/// that subsequent creates and redirects for the alias are served from the
/// cache. Promotion is best effort: cache write failures are logged and
/// never fail the request.
pub struct AnalyticsService {
    repository: Arc<dyn AnalyticsRepository>,
    cache: Arc<dyn CacheService>,
    promotion_threshold: i64,
}

impl AnalyticsService {
    pub fn new(
        repository: Arc<dyn AnalyticsRepository>,
        cache: Arc<dyn CacheService>,
        promotion_threshold: i64,
    ) -> Self {
        Self {
            repository,
            cache,
            promotion_threshold,
        }
    }

    /// Visit count at which aliases get promoted.
    pub fn promotion_threshold(&self) -> i64 {
        self.promotion_threshold
    }

    /// Returns the aggregated visits for one alias.
    ///
    /// If the alias is hot, it is promoted into the cache as a side effect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_analytics(&self, short_code: &str) -> Result<LinkAnalytics, AppError> {
        let analytics = self
            .repository
            .get_analytics(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Alias not found", json!({ "short_code": short_code }))
            })?;

        if analytics.is_hot(self.promotion_threshold) {
            self.promote(&analytics).await;
        }

        Ok(analytics)
    }

    /// Promotes every alias at or above the threshold.
    ///
    /// Returns the number of aliases fully written to the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the hot aliases cannot be listed.
    pub async fn warm_cache(&self) -> Result<usize, AppError> {
        let hot = self.repository.find_hot(self.promotion_threshold).await?;
        let total = hot.len();

        let mut promoted = 0;
        for analytics in &hot {
            if self.promote(analytics).await {
                promoted += 1;
            }
        }

        info!("Cache warm-up promoted {}/{} hot aliases", promoted, total);
        Ok(promoted)
    }

    pub async fn aggregate_by_user_agent(&self) -> Result<Vec<UserAgentStats>, AppError> {
        self.repository.aggregate_by_user_agent().await
    }

    pub async fn aggregate_by_date(&self) -> Result<Vec<DailyStats>, AppError> {
        self.repository.aggregate_by_date().await
    }

    pub async fn aggregate_by_month(&self) -> Result<Vec<MonthlyStats>, AppError> {
        self.repository.aggregate_by_month().await
    }

    async fn promote(&self, analytics: &LinkAnalytics) -> bool {
        let forward = self
            .cache
            .set(&analytics.long_url, &analytics.short_code, None)
            .await;
        let reverse = self
            .cache
            .set(&analytics.short_code, &analytics.long_url, None)
            .await;

        match forward.and(reverse) {
            Ok(()) => {
                debug!(
                    "Promoted {} ({} redirects) into cache",
                    analytics.short_code, analytics.redirect_count
                );
                true
            }
            Err(e) => {
                warn!("Failed to promote {} into cache: {}", analytics.short_code, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAnalyticsRepository;
    use crate::infrastructure::cache::{CacheError, MockCacheService};
    use chrono::Utc;

    fn analytics(short_code: &str, redirect_count: i64) -> LinkAnalytics {
        LinkAnalytics {
            short_code: short_code.to_string(),
            long_url: format!("https://example.com/{short_code}"),
            redirect_count,
            user_agents: vec!["UA1".to_string()],
            request_times: vec![Utc::now()],
        }
    }

    fn service(repo: MockAnalyticsRepository, cache: MockCacheService) -> AnalyticsService {
        AnalyticsService::new(Arc::new(repo), Arc::new(cache), DEFAULT_PROMOTION_THRESHOLD)
    }

    #[tokio::test]
    async fn test_get_analytics_below_threshold_skips_cache() {
        let mut repo = MockAnalyticsRepository::new();
        let mut cache = MockCacheService::new();

        repo.expect_get_analytics()
            .withf(|code| code == "abc1234")
            .times(1)
            .returning(|code| Ok(Some(analytics(code, 4))));
        cache.expect_set().times(0);

        let result = service(repo, cache).get_analytics("abc1234").await.unwrap();

        assert_eq!(result.redirect_count, 4);
        assert_eq!(result.user_agents, vec!["UA1".to_string()]);
    }

    #[tokio::test]
    async fn test_get_analytics_hot_alias_promotes_both_directions() {
        let mut repo = MockAnalyticsRepository::new();
        let mut cache = MockCacheService::new();

        repo.expect_get_analytics()
            .times(1)
            .returning(|code| Ok(Some(analytics(code, 5))));
        cache
            .expect_set()
            .withf(|key, value, ttl| {
                key == "https://example.com/abc1234" && value == "abc1234" && ttl.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        cache
            .expect_set()
            .withf(|key, value, ttl| {
                key == "abc1234" && value == "https://example.com/abc1234" && ttl.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = service(repo, cache).get_analytics("abc1234").await.unwrap();

        assert_eq!(result.redirect_count, 5);
    }

    #[tokio::test]
    async fn test_get_analytics_swallows_promotion_failure() {
        let mut repo = MockAnalyticsRepository::new();
        let mut cache = MockCacheService::new();

        repo.expect_get_analytics()
            .times(1)
            .returning(|code| Ok(Some(analytics(code, 12))));
        cache
            .expect_set()
            .returning(|_, _, _| Err(CacheError::ConnectionError("refused".to_string())));

        let result = service(repo, cache).get_analytics("abc1234").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_analytics_unknown_alias() {
        let mut repo = MockAnalyticsRepository::new();
        let cache = MockCacheService::new();

        repo.expect_get_analytics().times(1).returning(|_| Ok(None));

        let err = service(repo, cache)
            .get_analytics("nope")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_warm_cache_counts_successful_promotions() {
        let mut repo = MockAnalyticsRepository::new();
        let mut cache = MockCacheService::new();

        repo.expect_find_hot()
            .withf(|min| *min == DEFAULT_PROMOTION_THRESHOLD)
            .times(1)
            .returning(|_| Ok(vec![analytics("hot0001", 9), analytics("hot0002", 5)]));
        cache.expect_set().returning(|key, _, _| {
            if key.contains("hot0002") {
                Err(CacheError::OperationError("OOM".to_string()))
            } else {
                Ok(())
            }
        });

        let promoted = service(repo, cache).warm_cache().await.unwrap();

        assert_eq!(promoted, 1);
    }

    #[tokio::test]
    async fn test_aggregates_delegate_to_repository() {
        let mut repo = MockAnalyticsRepository::new();
        let cache = MockCacheService::new();

        repo.expect_aggregate_by_user_agent().times(1).returning(|| {
            Ok(vec![UserAgentStats {
                short_code: "abc1234".to_string(),
                user_agents: vec!["UA1".to_string(), "UA2".to_string()],
                redirect_count: 3,
            }])
        });
        repo.expect_aggregate_by_date()
            .times(1)
            .returning(|| Ok(vec![]));
        repo.expect_aggregate_by_month()
            .times(1)
            .returning(|| Ok(vec![]));

        let service = service(repo, cache);

        let by_agent = service.aggregate_by_user_agent().await.unwrap();
        assert_eq!(by_agent[0].redirect_count, 3);
        assert!(service.aggregate_by_date().await.unwrap().is_empty());
        assert!(service.aggregate_by_month().await.unwrap().is_empty());
    }
}
