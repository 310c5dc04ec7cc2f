use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::search::SearchSnapshot;

/// Typed view over the provider's current-weather payload.
///
/// The proxy forwards the raw JSON untouched; this struct only reads the
/// handful of fields the history record and the terminal view need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub cod: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sys: Option<Sys>,
    #[serde(default)]
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub timezone: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl CurrentWeather {
    /// Reads a payload leniently; anything that does not fit yields the
    /// empty view rather than an error.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Self {
        serde_json::from_value(payload.clone()).unwrap_or_default()
    }

    /// True when the payload is a successful lookup (`cod` is the number 200).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.cod.as_ref().and_then(Value::as_i64) == Some(200)
    }

    #[must_use]
    pub fn temp(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    #[must_use]
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.sys.as_ref().and_then(|s| s.country.as_deref())
    }

    #[must_use]
    pub fn wind_speed(&self) -> Option<f64> {
        self.wind.as_ref().and_then(|w| w.speed)
    }

    /// The history fields for this payload, keyed by an already normalized city.
    #[must_use]
    pub fn snapshot(&self, normalized_city: String, searched_at: DateTime<Utc>) -> SearchSnapshot {
        let condition = self.condition();
        SearchSnapshot {
            city: normalized_city,
            temp: self.temp(),
            description: condition.and_then(|c| c.description.clone()),
            icon: condition.and_then(|c| c.icon.clone()),
            timezone: self.timezone,
            searched_at,
        }
    }
}

/// Autocomplete candidate from the geocoding service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "countryCode", default)]
    pub country_code: String,
}
