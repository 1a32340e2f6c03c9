//! Handler for the shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL, or returns the existing one.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/some/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url": "https://example.com/some/page",
///   "short_code": "aB3dE5f",
///   "short_url": "http://localhost:8080/s/aB3dE5f"
/// }
/// ```
///
/// # Errors
///
/// - **400** malformed JSON, missing/oversized `url`, or an invalid URL
/// - **503** cache unreachable
/// - **500** store failure or short code allocation exhausted
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let shortened = state.link_service.create_short_url(&payload.url).await?;
    let short_url = state.short_url(&shortened.short_code);

    Ok(Json(ShortenResponse {
        url: shortened.long_url,
        short_code: shortened.short_code,
        short_url,
    }))
}
