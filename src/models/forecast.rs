use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::weather::{Condition, MainReadings};

/// Provider forecast response: a flat list of 3-hour slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub cod: Option<Value>,
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

/// One forecast slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    #[serde(default)]
    pub dt: i64,
    /// `"YYYY-MM-DD HH:MM:SS"`
    #[serde(default)]
    pub dt_txt: String,
    #[serde(default)]
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    /// The date portion of `dt_txt`.
    #[must_use]
    pub fn date_key(&self) -> &str {
        self.dt_txt
            .split_once(' ')
            .map_or(self.dt_txt.as_str(), |(date, _)| date)
    }

    #[must_use]
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}
