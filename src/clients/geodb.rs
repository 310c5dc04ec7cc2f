use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::GeocodingConfig;
use crate::constants::geocoding::CITIES_PATH;
use crate::models::Suggestion;

#[derive(Debug, Deserialize)]
struct GeoDbResponse {
    #[serde(default)]
    data: Vec<Suggestion>,
}

/// GeoDB Cities client used for city-name autocomplete.
///
/// Never fails: every problem is logged and turned into "no suggestions".
#[derive(Clone)]
pub struct GeoDbClient {
    client: Client,
    base_url: String,
    api_key: String,
    host: String,
    limit: u32,
    min_query_len: usize,
}

impl GeoDbClient {
    #[must_use]
    pub fn new(client: Client, config: &GeocodingConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            host: config.host.clone(),
            limit: config.limit,
            min_query_len: config.min_query_len,
        }
    }

    /// Whether `query` is long enough to be worth asking about.
    #[must_use]
    pub fn accepts(&self, query: &str) -> bool {
        let trimmed = query.trim();
        !trimmed.is_empty() && trimmed.chars().count() >= self.min_query_len
    }

    pub async fn suggest(&self, query: &str) -> Vec<Suggestion> {
        if !self.accepts(query) {
            return Vec::new();
        }

        let limit = self.limit.to_string();
        let url = match Url::parse_with_params(
            &format!("{}{}", self.base_url, CITIES_PATH),
            &[
                ("namePrefix", query.trim()),
                ("limit", limit.as_str()),
                ("sort", "-population"),
            ],
        ) {
            Ok(url) => url,
            Err(e) => {
                warn!("Invalid geocoding URL: {}", e);
                return Vec::new();
            }
        };

        let response = match self
            .client
            .get(url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Suggestion fetch error: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            debug!("Geocoding returned status {}", response.status());
            return Vec::new();
        }

        match response.json::<GeoDbResponse>().await {
            Ok(body) => body.data,
            Err(e) => {
                debug!("Geocoding parse error: {}", e);
                Vec::new()
            }
        }
    }
}
