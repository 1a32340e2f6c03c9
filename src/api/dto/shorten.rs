//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// The URL may omit its scheme; `https://` is assumed.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2048, message = "url must be 1 to 2048 characters"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// The normalized long URL.
    pub url: String,
    pub short_code: String,
    pub short_url: String,
}
