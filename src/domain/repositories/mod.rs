//! Repository trait definitions for the domain layer.
//!
//! Traits define the store contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! - [`UrlRepository`] - Mappings, the resolve transaction and visit recording
//! - [`AnalyticsRepository`] - Aggregations over redirect events

pub mod analytics_repository;
pub mod url_repository;

pub use analytics_repository::AnalyticsRepository;
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
