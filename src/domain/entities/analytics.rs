//! Read models produced by the analytics queries.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregated visits for a single short code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAnalytics {
    pub short_code: String,
    pub long_url: String,
    pub redirect_count: i64,
    /// Distinct user agents, sorted.
    pub user_agents: Vec<String>,
    /// Visit timestamps, ascending.
    pub request_times: Vec<DateTime<Utc>>,
}

impl LinkAnalytics {
    /// Returns true once the alias has been visited at least `threshold` times.
    pub fn is_hot(&self, threshold: i64) -> bool {
        self.redirect_count >= threshold
    }
}

/// Visits per short code with the distinct user agents seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAgentStats {
    pub short_code: String,
    pub user_agents: Vec<String>,
    pub redirect_count: i64,
}

/// A single visit inside a time bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitRef {
    pub short_code: String,
    pub time: DateTime<Utc>,
}

/// Visits bucketed by calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub redirect_count: i64,
    pub visits: Vec<VisitRef>,
}

/// Visits bucketed by calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub month: i32,
    pub year: i32,
    pub redirect_count: i64,
    pub visits: Vec<VisitRef>,
}

/// Pairs parallel code/time arrays returned by `ARRAY_AGG`.
///
/// Extra elements on either side are dropped.
pub fn zip_visits(codes: Vec<String>, times: Vec<DateTime<Utc>>) -> Vec<VisitRef> {
    codes
        .into_iter()
        .zip(times)
        .map(|(short_code, time)| VisitRef { short_code, time })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_hot_threshold_is_inclusive() {
        let mut analytics = LinkAnalytics {
            short_code: "aB3dE5f".to_string(),
            long_url: "https://example.com".to_string(),
            redirect_count: 4,
            user_agents: vec![],
            request_times: vec![],
        };

        assert!(!analytics.is_hot(5));
        analytics.redirect_count = 5;
        assert!(analytics.is_hot(5));
    }

    #[test]
    fn test_zip_visits_keeps_pairs_aligned() {
        let t1 = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2025, 3, 1, 11, 0, 0).unwrap();

        let visits = zip_visits(
            vec!["first00".to_string(), "second0".to_string(), "extra00".to_string()],
            vec![t1, t2],
        );

        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].short_code, "first00");
        assert_eq!(visits[0].time, t1);
        assert_eq!(visits[1].short_code, "second0");
        assert_eq!(visits[1].time, t2);
    }
}
