//! Domain service behind the weather proxy.
//!
//! Wraps the provider client and the search history store: lookups are
//! forwarded verbatim, successful current-weather lookups are written through
//! to history.

use crate::clients::openweather::ProviderError;
use crate::models::SearchRecord;
use serde_json::Value;
use thiserror::Error;

/// Errors specific to weather lookups.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City is required")]
    MissingParameter,

    #[error("Weather provider error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for WeatherError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for WeatherError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<ProviderError> for WeatherError {
    fn from(err: ProviderError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Returns the trimmed city, or [`WeatherError::MissingParameter`] when
/// nothing is left.
pub fn require_city(city: &str) -> Result<&str, WeatherError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(WeatherError::MissingParameter);
    }
    Ok(trimmed)
}

/// Domain service trait for weather lookups and search history.
#[async_trait::async_trait]
pub trait WeatherService: Send + Sync {
    /// Fetches current conditions and records them in search history.
    ///
    /// The provider payload is returned unmodified. History is written only
    /// when the provider answered with a success status, keyed by the
    /// normalized city name.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::MissingParameter`] for an empty city.
    /// Returns [`WeatherError::Upstream`] with the provider's status and message.
    /// Returns [`WeatherError::Internal`] or [`WeatherError::Database`] on
    /// transport or store failures.
    async fn current_weather(&self, city: &str) -> Result<Value, WeatherError>;

    /// Fetches the raw 5 day / 3 hour forecast. Never touches history.
    async fn forecast(&self, city: &str) -> Result<Value, WeatherError>;

    /// Most recently updated history records, newest first.
    async fn history(&self) -> Result<Vec<SearchRecord>, WeatherError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_city() {
        assert_eq!(require_city("  london ").unwrap(), "london");
        assert!(matches!(require_city(""), Err(WeatherError::MissingParameter)));
        assert!(matches!(require_city(" \t"), Err(WeatherError::MissingParameter)));
    }
}
