//! `SeaORM` implementation of the `WeatherService` trait.

use crate::clients::openweather::{OpenWeatherClient, ProviderResponse};
use crate::constants::limits::HISTORY_LIMIT;
use crate::db::Store;
use crate::models::{CurrentWeather, SearchRecord};
use crate::parser::city::normalize_city;
use crate::services::weather_service::{WeatherError, WeatherService, require_city};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

pub struct SeaOrmWeatherService {
    store: Store,
    provider: Arc<OpenWeatherClient>,
    history_limit: u64,
}

impl SeaOrmWeatherService {
    /// `history_limit` is capped at [`HISTORY_LIMIT`].
    #[must_use]
    pub fn new(store: Store, provider: Arc<OpenWeatherClient>, history_limit: u64) -> Self {
        Self {
            store,
            provider,
            history_limit: history_limit.min(HISTORY_LIMIT),
        }
    }

    fn upstream(response: &ProviderResponse) -> WeatherError {
        WeatherError::Upstream {
            status: response.status,
            message: response.error_message(),
        }
    }
}

#[async_trait]
impl WeatherService for SeaOrmWeatherService {
    async fn current_weather(&self, city: &str) -> Result<Value, WeatherError> {
        let city = require_city(city)?;

        let response = self.provider.fetch_current(city).await?;
        if !response.is_success() {
            return Err(Self::upstream(&response));
        }

        let weather = CurrentWeather::from_payload(&response.payload);
        let key = normalize_city(city);

        if key.is_empty() {
            warn!(city, "City normalizes to an empty name, not recording history");
        } else {
            let record = self
                .store
                .upsert_search(&weather.snapshot(key, chrono::Utc::now()))
                .await?;
            metrics::counter!("history_upserts_total").increment(1);
            info!(city = %record.city, id = record.id, "Search history updated");
        }

        info!(
            "Weather data fetched: {}",
            weather.name.as_deref().unwrap_or(city)
        );
        Ok(response.payload)
    }

    async fn forecast(&self, city: &str) -> Result<Value, WeatherError> {
        let city = require_city(city)?;

        let response = self.provider.fetch_forecast(city).await?;
        if !response.is_success() {
            return Err(Self::upstream(&response));
        }

        Ok(response.payload)
    }

    async fn history(&self) -> Result<Vec<SearchRecord>, WeatherError> {
        Ok(self.store.recent_searches(self.history_limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn service_for(server: &MockServer, history_limit: u64) -> (SeaOrmWeatherService, Store) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let config = ProviderConfig {
            api_key: "test-key".to_string(),
            base_url: server.uri(),
            ..ProviderConfig::default()
        };
        let provider = Arc::new(OpenWeatherClient::new(&config).unwrap());
        (
            SeaOrmWeatherService::new(store.clone(), provider, history_limit),
            store,
        )
    }

    fn paris_payload(temp: f64) -> Value {
        json!({
            "cod": 200,
            "name": "Paris",
            "sys": { "country": "FR" },
            "main": { "temp": temp },
            "weather": [{ "description": "clear sky", "icon": "01d" }],
            "timezone": 7200
        })
    }

    #[tokio::test]
    async fn test_variants_upsert_one_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload(21.0)))
            .mount(&server)
            .await;
        let (service, store) = service_for(&server, 10).await;

        let payload = service.current_weather("City of Paris").await.unwrap();
        assert_eq!(payload, paris_payload(21.0));
        service.current_weather("paris").await.unwrap();
        service.current_weather("PARIS, FR").await.unwrap();

        assert_eq!(store.search_count().await.unwrap(), 1);
        let record = store.get_search("Paris").await.unwrap().unwrap();
        assert_eq!(record.temp, Some(21.0));
        assert_eq!(record.description.as_deref(), Some("clear sky"));
        assert_eq!(record.icon.as_deref(), Some("01d"));
        assert_eq!(record.timezone, Some(7200));
    }

    #[tokio::test]
    async fn test_upstream_failure_does_not_write() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;
        let (service, store) = service_for(&server, 10).await;

        let err = service.current_weather("atlantis").await.unwrap_err();
        match err {
            WeatherError::Upstream { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "city not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.search_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_city_skips_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let (service, store) = service_for(&server, 10).await;

        assert!(matches!(
            service.current_weather("  ").await,
            Err(WeatherError::MissingParameter)
        ));
        assert!(matches!(
            service.forecast("").await,
            Err(WeatherError::MissingParameter)
        ));
        assert_eq!(store.search_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_forecast_never_writes_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "cod": "200", "list": [] })),
            )
            .mount(&server)
            .await;
        let (service, store) = service_for(&server, 10).await;

        let payload = service.forecast("paris").await.unwrap();
        assert_eq!(payload["list"], json!([]));
        assert_eq!(store.search_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_history_respects_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload(10.0)))
            .mount(&server)
            .await;
        let (service, _store) = service_for(&server, 3).await;

        for city in ["Oslo", "Bergen", "Tromso", "Bodo", "Alta"] {
            service.current_weather(city).await.unwrap();
        }

        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[tokio::test]
    async fn test_history_limit_is_capped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload(10.0)))
            .mount(&server)
            .await;
        let (service, store) = service_for(&server, 50).await;

        for i in 0..12 {
            service.current_weather(&format!("town{i}")).await.unwrap();
        }

        assert_eq!(store.search_count().await.unwrap(), 12);
        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 10);
        assert_eq!(history[0].city, "Town11");
    }
}
