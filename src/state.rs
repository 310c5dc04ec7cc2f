use std::sync::Arc;

use crate::clients::openweather::OpenWeatherClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{SeaOrmWeatherService, WeatherService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
pub fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("Weathervane/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub weather_service: Arc<dyn WeatherService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client =
            build_shared_http_client(config.provider.request_timeout_seconds.into())?;
        let provider = Arc::new(OpenWeatherClient::with_shared_client(
            http_client,
            &config.provider,
        ));

        let weather_service: Arc<dyn WeatherService> = Arc::new(SeaOrmWeatherService::new(
            store,
            provider,
            config.general.history_limit,
        ));

        Ok(Self {
            config: Arc::new(config),
            weather_service,
        })
    }
}
