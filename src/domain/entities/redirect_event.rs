//! Redirect event entity representing a single visit to a short code.

use chrono::{DateTime, Utc};

/// A recorded redirect.
///
/// Append-only: events are never updated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectEvent {
    pub id: i64,
    pub short_code: String,
    pub user_agent: Option<String>,
    pub request_time: DateTime<Utc>,
}

/// Visit information captured by the redirect handler.
///
/// The `short_code` is stored as-is; the store does not enforce that it
/// references an existing mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRedirectEvent {
    pub short_code: String,
    pub user_agent: Option<String>,
    pub request_time: DateTime<Utc>,
}

impl NewRedirectEvent {
    /// Creates a visit stamped with the current time.
    pub fn now(short_code: impl Into<String>, user_agent: Option<&str>) -> Self {
        Self {
            short_code: short_code.into(),
            user_agent: user_agent.map(str::to_string),
            request_time: Utc::now(),
        }
    }
}
