//! URL normalization for long URLs.
//!
//! The normalized form is the canonical cache and store key, so
//! `example.com` and `https://example.com` map to the same short code.

use url::Url;

/// Longest accepted long URL, in bytes after trimming.
///
/// Keeps `urls.long_url` well under the btree index row limit even for
/// multibyte input.
pub const MAX_URL_BYTES: usize = 2048;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must contain a host")]
    MissingHost,

    #[error("URL must not contain control characters")]
    ControlCharacter,

    #[error("URL must be at most {} bytes", MAX_URL_BYTES)]
    TooLong,
}

/// Normalizes a long URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Control characters (tabs, newlines) and inputs over [`MAX_URL_BYTES`]
///    are rejected
/// 3. If the URL does not start with `http://` or `https://` (any case),
///    `https://` is prepended
/// 4. The result must parse as an absolute URL with a host
///
/// The returned string is the prefixed input itself, not a re-serialization,
/// so `http://a.com` stays `http://a.com` (no trailing slash is added).
/// `Url::parse` silently drops embedded tabs and newlines, so they are
/// refused up front: the stored string is sent back verbatim as a
/// `Location` header.
///
/// # Errors
///
/// Returns [`UrlNormalizationError`] if the input is empty or does not form
/// a valid http(s) URL.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("http://a.com").unwrap(), "http://a.com");
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }
    if trimmed.chars().any(char::is_control) {
        return Err(UrlNormalizationError::ControlCharacter);
    }
    if trimmed.len() > MAX_URL_BYTES {
        return Err(UrlNormalizationError::TooLong);
    }

    let normalized = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed =
        Url::parse(&normalized).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(normalized),
        _ => Err(UrlNormalizationError::MissingHost),
    }
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url
        .get(..8)
        .unwrap_or(url)
        .to_ascii_lowercase();

    lower.starts_with("http://") || lower.starts_with("https://")
}
