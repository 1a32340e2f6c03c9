//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//!
//! - [`PgUrlRepository`] - Mapping storage, the resolve transaction and visit recording
//! - [`PgAnalyticsRepository`] - Aggregation queries over redirect events

pub mod pg_analytics_repository;
pub mod pg_url_repository;

pub use pg_analytics_repository::PgAnalyticsRepository;
pub use pg_url_repository::PgUrlRepository;
