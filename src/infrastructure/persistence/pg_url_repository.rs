//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewRedirectEvent, NewUrlMapping, RedirectEvent, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct UrlMappingRow {
    id: i64,
    long_url: String,
    short_code: String,
}

impl From<UrlMappingRow> for UrlMapping {
    fn from(r: UrlMappingRow) -> Self {
        UrlMapping::new(r.id, r.long_url, r.short_code)
    }
}

#[derive(FromRow)]
struct RedirectEventRow {
    id: i64,
    short_code: String,
    user_agent: Option<String>,
    request_time: DateTime<Utc>,
}

/// PostgreSQL repository for mappings and redirect events.
///
/// Uses bound parameters throughout; the only transaction is
/// [`UrlRepository::resolve_and_record`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        // A short_code collision still raises a unique violation, which maps to Conflict.
        let inserted = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            INSERT INTO urls (long_url, short_code)
            VALUES ($1, $2)
            ON CONFLICT (long_url) DO NOTHING
            RETURNING id, long_url, short_code
            "#,
        )
        .bind(&new_mapping.long_url)
        .bind(&new_mapping.short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(row) = inserted {
            return Ok(row.into());
        }

        self.find_by_long_url(&new_mapping.long_url)
            .await?
            .ok_or_else(|| {
                AppError::internal(
                    "Mapping vanished after concurrent insert",
                    serde_json::json!({ "long_url": new_mapping.long_url }),
                )
            })
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            "SELECT id, long_url, short_code FROM urls WHERE long_url = $1",
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            "SELECT id, long_url, short_code FROM urls WHERE short_code = $1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn resolve_and_record(
        &self,
        short_code: &str,
        visit: NewRedirectEvent,
    ) -> Result<Option<UrlMapping>, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UrlMappingRow>(
            "SELECT id, long_url, short_code FROM urls WHERE short_code = $1",
        )
        .bind(short_code)
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping `tx` rolls back.
        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            INSERT INTO redirect_events (short_code, user_agent, request_time)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&visit.short_code)
        .bind(&visit.user_agent)
        .bind(visit.request_time)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(row.into()))
    }

    async fn record_visit(&self, visit: NewRedirectEvent) -> Result<RedirectEvent, AppError> {
        let row = sqlx::query_as::<_, RedirectEventRow>(
            r#"
            INSERT INTO redirect_events (short_code, user_agent, request_time)
            VALUES ($1, $2, $3)
            RETURNING id, short_code, user_agent, request_time
            "#,
        )
        .bind(&visit.short_code)
        .bind(&visit.user_agent)
        .bind(visit.request_time)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(RedirectEvent {
            id: row.id,
            short_code: row.short_code,
            user_agent: row.user_agent,
            request_time: row.request_time,
        })
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
