//! PostgreSQL implementation of the analytics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{
    DailyStats, LinkAnalytics, MonthlyStats, UserAgentStats, zip_visits,
};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// Per-alias aggregate. `LEFT JOIN` keeps allocated codes without visits.
const LINK_ANALYTICS_SELECT: &str = r#"
    SELECT
        u.short_code,
        u.long_url,
        COUNT(r.id) AS redirect_count,
        COALESCE(
            ARRAY_AGG(DISTINCT r.user_agent ORDER BY r.user_agent)
                FILTER (WHERE r.user_agent IS NOT NULL),
            '{}'
        ) AS user_agents,
        COALESCE(
            ARRAY_AGG(r.request_time ORDER BY r.request_time)
                FILTER (WHERE r.id IS NOT NULL),
            '{}'
        ) AS request_times
    FROM urls u
    LEFT JOIN redirect_events r ON r.short_code = u.short_code
"#;

#[derive(FromRow)]
struct LinkAnalyticsRow {
    short_code: String,
    long_url: String,
    redirect_count: i64,
    user_agents: Vec<String>,
    request_times: Vec<DateTime<Utc>>,
}

impl From<LinkAnalyticsRow> for LinkAnalytics {
    fn from(r: LinkAnalyticsRow) -> Self {
        LinkAnalytics {
            short_code: r.short_code,
            long_url: r.long_url,
            redirect_count: r.redirect_count,
            user_agents: r.user_agents,
            request_times: r.request_times,
        }
    }
}

#[derive(FromRow)]
struct UserAgentRow {
    short_code: String,
    redirect_count: i64,
    user_agents: Vec<String>,
}

#[derive(FromRow)]
struct DailyRow {
    redirect_count: i64,
    day: i32,
    month: i32,
    year: i32,
    short_codes: Vec<String>,
    request_times: Vec<DateTime<Utc>>,
}

#[derive(FromRow)]
struct MonthlyRow {
    redirect_count: i64,
    month: i32,
    year: i32,
    short_codes: Vec<String>,
    request_times: Vec<DateTime<Utc>>,
}

/// PostgreSQL repository for analytics queries.
///
/// Buckets are computed in UTC.
pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn get_analytics(&self, short_code: &str) -> Result<Option<LinkAnalytics>, AppError> {
        let query = format!(
            "{LINK_ANALYTICS_SELECT} WHERE u.short_code = $1 GROUP BY u.short_code, u.long_url"
        );

        let row = sqlx::query_as::<_, LinkAnalyticsRow>(&query)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_hot(&self, min_redirects: i64) -> Result<Vec<LinkAnalytics>, AppError> {
        let query = format!(
            "{LINK_ANALYTICS_SELECT} GROUP BY u.short_code, u.long_url \
             HAVING COUNT(r.id) >= $1 ORDER BY u.short_code"
        );

        let rows = sqlx::query_as::<_, LinkAnalyticsRow>(&query)
            .bind(min_redirects)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn aggregate_by_user_agent(&self) -> Result<Vec<UserAgentStats>, AppError> {
        let rows = sqlx::query_as::<_, UserAgentRow>(
            r#"
            SELECT
                short_code,
                COUNT(*) AS redirect_count,
                COALESCE(
                    ARRAY_AGG(DISTINCT user_agent ORDER BY user_agent)
                        FILTER (WHERE user_agent IS NOT NULL),
                    '{}'
                ) AS user_agents
            FROM redirect_events
            GROUP BY short_code
            ORDER BY short_code
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| UserAgentStats {
                short_code: r.short_code,
                user_agents: r.user_agents,
                redirect_count: r.redirect_count,
            })
            .collect())
    }

    async fn aggregate_by_date(&self) -> Result<Vec<DailyStats>, AppError> {
        let rows = sqlx::query_as::<_, DailyRow>(
            r#"
            SELECT
                COUNT(*) AS redirect_count,
                EXTRACT(DAY FROM request_time AT TIME ZONE 'UTC')::int AS day,
                EXTRACT(MONTH FROM request_time AT TIME ZONE 'UTC')::int AS month,
                EXTRACT(YEAR FROM request_time AT TIME ZONE 'UTC')::int AS year,
                ARRAY_AGG(short_code ORDER BY request_time, id)::text[] AS short_codes,
                ARRAY_AGG(request_time ORDER BY request_time, id) AS request_times
            FROM redirect_events
            GROUP BY year, month, day
            ORDER BY year, month, day
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DailyStats {
                day: r.day,
                month: r.month,
                year: r.year,
                redirect_count: r.redirect_count,
                visits: zip_visits(r.short_codes, r.request_times),
            })
            .collect())
    }

    async fn aggregate_by_month(&self) -> Result<Vec<MonthlyStats>, AppError> {
        let rows = sqlx::query_as::<_, MonthlyRow>(
            r#"
            SELECT
                COUNT(*) AS redirect_count,
                EXTRACT(MONTH FROM request_time AT TIME ZONE 'UTC')::int AS month,
                EXTRACT(YEAR FROM request_time AT TIME ZONE 'UTC')::int AS year,
                ARRAY_AGG(short_code ORDER BY request_time, id)::text[] AS short_codes,
                ARRAY_AGG(request_time ORDER BY request_time, id) AS request_times
            FROM redirect_events
            GROUP BY year, month
            ORDER BY year, month
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MonthlyStats {
                month: r.month,
                year: r.year,
                redirect_count: r.redirect_count,
                visits: zip_visits(r.short_codes, r.request_times),
            })
            .collect())
    }
}
