use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::ProviderConfig;
use crate::constants::provider::{CURRENT_PATH, FORECAST_PATH};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Weather provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid weather provider URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Weather provider returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Status and body of a single provider round trip. Non-success statuses
/// are data here, not errors; the caller decides what to do with them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: u16,
    pub payload: Value,
}

impl ProviderResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// The provider's `message` field, or the status reason when it sent none.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(ToString::to_string)
            .unwrap_or_else(|| {
                StatusCode::from_u16(self.status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Upstream error")
                    .to_string()
            })
    }
}

/// OpenWeatherMap client for current conditions and the 5 day / 3 hour forecast.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    units: String,
}

impl OpenWeatherClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(
                config.request_timeout_seconds.into(),
            ))
            .build()?;
        Ok(Self::with_shared_client(client, config))
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
        }
    }

    pub async fn fetch_current(&self, city: &str) -> Result<ProviderResponse, ProviderError> {
        self.fetch("current", CURRENT_PATH, city).await
    }

    pub async fn fetch_forecast(&self, city: &str) -> Result<ProviderResponse, ProviderError> {
        self.fetch("forecast", FORECAST_PATH, city).await
    }

    fn endpoint_url(&self, path: &str, city: &str) -> Result<Url, ProviderError> {
        Ok(Url::parse_with_params(
            &format!("{}{}", self.base_url, path),
            &[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ],
        )?)
    }

    async fn fetch(
        &self,
        endpoint: &'static str,
        path: &str,
        city: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let url = self.endpoint_url(path, city)?;
        debug!(endpoint, city, "Requesting weather provider");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        metrics::counter!(
            "provider_requests_total",
            "endpoint" => endpoint,
            "status" => status.as_u16().to_string()
        )
        .increment(1);

        let payload = match serde_json::from_str::<Value>(&body) {
            Ok(value) => value,
            Err(e) if status.is_success() => return Err(ProviderError::Decode(e)),
            Err(_) => json!({ "message": body.trim() }),
        };

        let response = ProviderResponse {
            status: status.as_u16(),
            payload,
        };

        if !response.is_success() {
            warn!(
                endpoint,
                city,
                status = response.status,
                "Weather provider error: {}",
                response.error_message()
            );
        }

        Ok(response)
    }
}
