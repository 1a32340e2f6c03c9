//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use analytics::{
    analytics_handler, daily_stats_handler, monthly_stats_handler, user_agent_stats_handler,
};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
