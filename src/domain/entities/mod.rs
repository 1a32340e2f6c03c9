//! Core domain entities.
//!
//! - [`UrlMapping`] - A long URL ↔ short code mapping
//! - [`RedirectEvent`] - A recorded visit to a short code
//! - [`LinkAnalytics`] and friends - Aggregated read models over redirect events
//!
//! Creation inputs use separate `New*` structs.

pub mod analytics;
pub mod redirect_event;
pub mod url_mapping;

pub use analytics::{
    DailyStats, LinkAnalytics, MonthlyStats, UserAgentStats, VisitRef, zip_visits,
};
pub use redirect_event::{NewRedirectEvent, RedirectEvent};
pub use url_mapping::{NewUrlMapping, ShortenedUrl, UrlMapping};
