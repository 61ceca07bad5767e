//! Click entity and the aggregates derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Coarse device classification derived from the User-Agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Mobile,
    Bot,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Bot => "bot",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded visit of an alias.
///
/// `alias` refers to a link by name only; the click log does not enforce
/// that the link exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub id: Uuid,
    pub alias: String,
    pub user_agent: String,
    pub client_name: String,
    pub device_type: DeviceType,
    pub ip: String,
    pub clicked_at: DateTime<Utc>,
}

/// Input data for appending a click to the log.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub id: Uuid,
    pub alias: String,
    pub user_agent: String,
    pub client_name: String,
    pub device_type: DeviceType,
    pub ip: String,
    pub clicked_at: DateTime<Utc>,
}

impl NewClick {
    pub fn into_click(self) -> Click {
        Click {
            id: self.id,
            alias: self.alias,
            user_agent: self.user_agent,
            client_name: self.client_name,
            device_type: self.device_type,
            ip: self.ip,
            clicked_at: self.clicked_at,
        }
    }
}

/// One bucket of a grouped count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickCount {
    pub key: String,
    pub clicks: i64,
}

impl ClickCount {
    pub fn new(key: impl Into<String>, clicks: i64) -> Self {
        Self {
            key: key.into(),
            clicks,
        }
    }
}

/// Click totals for one alias, recomputed on every request.
///
/// - `by_day` - `YYYY-MM-DD` keys, ascending
/// - `by_month` - `YYYY-MM` keys, ascending
/// - `by_client` - client names, most clicks first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickSummary {
    pub alias: String,
    pub by_day: Vec<ClickCount>,
    pub by_month: Vec<ClickCount>,
    pub by_client: Vec<ClickCount>,
}

impl ClickSummary {
    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty() && self.by_month.is_empty() && self.by_client.is_empty()
    }
}
