//! Handlers for visit analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::domain::entities::{DailyStats, LinkAnalytics, MonthlyStats, UserAgentStats};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the visit aggregate for a single alias.
///
/// # Endpoint
///
/// `GET /analytics/{short_code}`
///
/// # Response
///
/// ```json
/// {
///   "short_code": "aB3dE5f",
///   "long_url": "https://example.com",
///   "redirect_count": 2,
///   "user_agents": ["curl/8.5.0", "Mozilla/5.0"],
///   "request_times": ["2025-03-01T10:00:00Z", "2025-03-01T11:00:00Z"]
/// }
/// ```
///
/// Hot aliases (at or above the promotion threshold) are pushed into the
/// cache as a side effect.
///
/// # Errors
///
/// Returns 404 Not Found if the alias was never allocated.
pub async fn analytics_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkAnalytics>, AppError> {
    let analytics = state.analytics_service.get_analytics(&short_code).await?;
    Ok(Json(analytics))
}

/// `GET /analytics/user_agent` - visits per alias with distinct user agents.
pub async fn user_agent_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserAgentStats>>, AppError> {
    Ok(Json(state.analytics_service.aggregate_by_user_agent().await?))
}

/// `GET /analytics/date` - visits per calendar day (UTC).
pub async fn daily_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<DailyStats>>, AppError> {
    Ok(Json(state.analytics_service.aggregate_by_date().await?))
}

/// `GET /analytics/month` - visits per calendar month (UTC).
pub async fn monthly_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthlyStats>>, AppError> {
    Ok(Json(state.analytics_service.aggregate_by_month().await?))
}
