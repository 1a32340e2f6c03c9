//! Repository trait for analytics over redirect events.

use crate::domain::entities::{DailyStats, LinkAnalytics, MonthlyStats, UserAgentStats};
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only aggregation queries over redirect events.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAnalyticsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Aggregates the visits of one short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(analytics))` if the code is allocated (count may be zero)
    /// - `Ok(None)` if no mapping exists for the code
    async fn get_analytics(&self, short_code: &str) -> Result<Option<LinkAnalytics>, AppError>;

    /// Lists every alias whose visit count is at least `min_redirects`.
    async fn find_hot(&self, min_redirects: i64) -> Result<Vec<LinkAnalytics>, AppError>;

    /// Visits per short code with distinct user agents, ordered by code.
    async fn aggregate_by_user_agent(&self) -> Result<Vec<UserAgentStats>, AppError>;

    /// Visits bucketed by day, oldest first.
    async fn aggregate_by_date(&self) -> Result<Vec<DailyStats>, AppError>;

    /// Visits bucketed by month, oldest first.
    async fn aggregate_by_month(&self) -> Result<Vec<MonthlyStats>, AppError>;
}
