use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The most recent weather snapshot stored for one normalized city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    #[serde(default)]
    pub id: i32,
    pub city: String,
    pub temp: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub timezone: Option<i32>,
    pub searched_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written on every successful current-weather lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    /// Already normalized; the repository does not normalize again.
    pub city: String,
    pub temp: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub timezone: Option<i32>,
    pub searched_at: DateTime<Utc>,
}
