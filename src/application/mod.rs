//! Application layer services implementing business logic.
//!
//! Services coordinate the store and the cache behind repository and cache
//! traits, and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short URL creation and redirect resolution
//! - [`services::analytics_service::AnalyticsService`] - Visit aggregates and cache promotion
//! - [`services::allocator::CodeAllocator`] - Unique short code allocation

pub mod services;
