//! Mapping between a long URL and its short code.

use serde::Serialize;

/// A stored long URL ↔ short code mapping.
///
/// Created once by the allocator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMapping {
    #[serde(skip)]
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(id: i64, long_url: String, short_code: String) -> Self {
        Self {
            id,
            long_url,
            short_code,
        }
    }
}

/// Outcome of a shorten request.
///
/// May be served from cache, so it carries no row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenedUrl {
    pub long_url: String,
    pub short_code: String,
}

impl From<UrlMapping> for ShortenedUrl {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            long_url: mapping.long_url,
            short_code: mapping.short_code,
        }
    }
}

/// Input data for inserting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub long_url: String,
    pub short_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_mapping_creation() {
        let mapping = UrlMapping::new(
            1,
            "https://example.com".to_string(),
            "aB3dE5f".to_string(),
        );

        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.long_url, "https://example.com");
        assert_eq!(mapping.short_code, "aB3dE5f");
    }

    #[test]
    fn test_url_mapping_serialization_hides_id() {
        let mapping = UrlMapping::new(
            42,
            "https://example.com".to_string(),
            "aB3dE5f".to_string(),
        );

        let json = serde_json::to_value(&mapping).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["short_code"], "aB3dE5f");
    }

    #[test]
    fn test_shortened_url_from_mapping() {
        let mapping = UrlMapping::new(
            7,
            "https://example.com".to_string(),
            "aB3dE5f".to_string(),
        );

        let shortened = ShortenedUrl::from(mapping);
        assert_eq!(shortened.long_url, "https://example.com");
        assert_eq!(shortened.short_code, "aB3dE5f");
    }
}
