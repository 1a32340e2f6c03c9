//! Shortening and analytics route configuration.

use crate::api::handlers::{
    analytics_handler, daily_stats_handler, monthly_stats_handler, shorten_handler,
    user_agent_stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Shortening and analytics routes.
///
/// # Endpoints
///
/// - `POST /shorten`                 - Create or fetch a short URL
/// - `GET  /analytics/user_agent`    - Visits grouped by alias with user agents
/// - `GET  /analytics/date`          - Visits grouped by day
/// - `GET  /analytics/month`         - Visits grouped by month
/// - `GET  /analytics/{short_code}`  - Visits of one alias
///
/// Static analytics segments take precedence over `{short_code}`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/analytics/user_agent", get(user_agent_stats_handler))
        .route("/analytics/date", get(daily_stats_handler))
        .route("/analytics/month", get(monthly_stats_handler))
        .route("/analytics/{short_code}", get(analytics_handler))
}
