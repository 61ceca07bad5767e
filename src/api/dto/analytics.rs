//! DTOs for the analytics endpoint.

use serde::Serialize;

use crate::domain::entities::{ClickCount, ClickSummary};

/// Clicks on one day (`YYYY-MM-DD`, UTC).
#[derive(Debug, Serialize)]
pub struct DayClicks {
    pub date: String,
    pub clicks: i64,
}

/// Clicks in one month (`YYYY-MM`, UTC).
#[derive(Debug, Serialize)]
pub struct MonthClicks {
    pub month: String,
    pub clicks: i64,
}

/// Clicks from one client application.
#[derive(Debug, Serialize)]
pub struct ClientClicks {
    pub client: String,
    pub clicks: i64,
}

/// Click summary for one alias.
///
/// ```json
/// {
///   "alias": "xk9P2q",
///   "by_day": [{ "date": "2024-03-01", "clicks": 12 }],
///   "by_month": [{ "month": "2024-03", "clicks": 12 }],
///   "by_client": [{ "client": "Chrome", "clicks": 9 }]
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub alias: String,
    pub by_day: Vec<DayClicks>,
    pub by_month: Vec<MonthClicks>,
    pub by_client: Vec<ClientClicks>,
}

fn convert<T>(counts: Vec<ClickCount>, f: fn(String, i64) -> T) -> Vec<T> {
    counts.into_iter().map(|c| f(c.key, c.clicks)).collect()
}

impl From<ClickSummary> for AnalyticsResponse {
    fn from(summary: ClickSummary) -> Self {
        Self {
            alias: summary.alias,
            by_day: convert(summary.by_day, |date, clicks| DayClicks { date, clicks }),
            by_month: convert(summary.by_month, |month, clicks| MonthClicks { month, clicks }),
            by_client: convert(summary.by_client, |client, clicks| ClientClicks { client, clicks }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_serialization() {
        let summary = ClickSummary {
            alias: "abc".to_string(),
            by_day: vec![ClickCount::new("2024-03-01", 2)],
            by_month: vec![ClickCount::new("2024-03", 2)],
            by_client: vec![ClickCount::new("Firefox", 2)],
        };

        let value = serde_json::to_value(AnalyticsResponse::from(summary)).unwrap();

        assert_eq!(
            value,
            json!({
                "alias": "abc",
                "by_day": [{ "date": "2024-03-01", "clicks": 2 }],
                "by_month": [{ "month": "2024-03", "clicks": 2 }],
                "by_client": [{ "client": "Firefox", "clicks": 2 }]
            })
        );
    }
}
