//! Business logic services for the application layer.

pub mod allocator;
pub mod analytics_service;
pub mod link_service;

pub use allocator::{CodeAllocator, DEFAULT_ALLOCATION_ATTEMPTS};
pub use analytics_service::{AnalyticsService, DEFAULT_PROMOTION_THRESHOLD};
pub use link_service::LinkService;
