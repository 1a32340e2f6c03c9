//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};

use crate::domain::entities::NewRedirectEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and records the visit.
///
/// # Endpoint
///
/// `GET /s/{short_code}`
///
/// # Request Flow
///
/// 1. Check cache for the code
/// 2. Cache hit: record the visit, redirect
/// 3. Cache miss: resolve and record the visit in one store transaction
/// 4. Return 307 Temporary Redirect
///
/// The `User-Agent` header is stored with the visit (NULL when absent).
/// Temporary redirects keep browsers coming back, so every visit is counted.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 503 Service Unavailable if the cache is unreachable.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    let visit = NewRedirectEvent::now(short_code, user_agent);
    let long_url = state.link_service.resolve_short_url(visit).await?;

    Ok(Redirect::temporary(&long_url))
}
