use anyhow::Result;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::models::{CurrentWeather, ForecastPayload, SearchRecord};

/// Terminal-side client for the weather proxy's HTTP API.
#[derive(Clone)]
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get(&self, path: &str, city: Option<&str>) -> Result<(u16, Value)> {
        let url = match city {
            Some(city) => format!(
                "{}{}?city={}",
                self.base_url,
                path,
                urlencoding::encode(city)
            ),
            None => format!("{}{}", self.base_url, path),
        };

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok((status, body))
    }

    /// `None` when the proxy answered with anything but a successful lookup.
    pub async fn current_weather(&self, city: &str) -> Result<Option<CurrentWeather>> {
        let (status, body) = self.get("/api/weather", Some(city)).await?;
        let weather = CurrentWeather::from_payload(&body);

        if status != 200 || !weather.is_success() {
            let reason = body
                .get("error")
                .or_else(|| body.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            debug!(status, reason, "Weather lookup rejected by proxy");
            return Ok(None);
        }

        Ok(Some(weather))
    }

    pub async fn forecast(&self, city: &str) -> Result<Option<ForecastPayload>> {
        let (status, body) = self.get("/api/weather/forecast", Some(city)).await?;

        if status != 200 || body.get("list").is_none() {
            return Ok(None);
        }

        Ok(serde_json::from_value(body).ok())
    }

    pub async fn history(&self) -> Result<Vec<SearchRecord>> {
        let (status, body) = self.get("/api/weather/history", None).await?;

        if status != 200 {
            anyhow::bail!("History request failed with status {status}");
        }

        Ok(serde_json::from_value(body)?)
    }
}
