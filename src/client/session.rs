use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::forecast::reduce_daily;
use crate::clients::proxy::ProxyClient;
use crate::constants::limits::FORECAST_DAYS;
use crate::models::{CurrentWeather, ForecastEntry, SearchRecord};

/// Identifies one lookup; only the most recently issued ticket may apply results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct LookupSequencer {
    latest: AtomicU64,
}

impl LookupSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new lookup, superseding every earlier ticket.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Everything the terminal view shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub weather: Option<CurrentWeather>,
    pub forecast: Vec<ForecastEntry>,
    pub history: Vec<SearchRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Weather, forecast and history were refreshed.
    Applied,
    /// The city had no successful lookup; the weather panel was cleared.
    NotFound,
    /// The proxy could not be reached; nothing changed.
    Failed,
    /// A newer lookup started before this one finished; results were dropped.
    Superseded,
}

/// Runs the current → forecast → history chain against the proxy.
pub struct WeatherSession {
    proxy: ProxyClient,
    sequencer: LookupSequencer,
    dashboard: RwLock<Dashboard>,
}

impl WeatherSession {
    #[must_use]
    pub fn new(proxy: ProxyClient) -> Self {
        Self {
            proxy,
            sequencer: LookupSequencer::new(),
            dashboard: RwLock::new(Dashboard::default()),
        }
    }

    pub async fn dashboard(&self) -> Dashboard {
        self.dashboard.read().await.clone()
    }

    async fn apply(&self, ticket: Ticket, update: impl FnOnce(&mut Dashboard)) -> bool {
        let mut dashboard = self.dashboard.write().await;
        if !self.sequencer.is_current(ticket) {
            return false;
        }
        update(&mut dashboard);
        true
    }

    pub async fn lookup(&self, city: &str) -> LookupOutcome {
        let ticket = self.sequencer.issue();

        let weather = match self.proxy.current_weather(city).await {
            Ok(Some(weather)) => weather,
            Ok(None) => {
                return if self.apply(ticket, |d| d.weather = None).await {
                    LookupOutcome::NotFound
                } else {
                    LookupOutcome::Superseded
                };
            }
            Err(e) => {
                error!(error = %e, city, "Weather lookup failed");
                return LookupOutcome::Failed;
            }
        };

        if !self.apply(ticket, |d| d.weather = Some(weather)).await {
            debug!(city, "Dropping stale weather result");
            return LookupOutcome::Superseded;
        }

        let forecast = match self.proxy.forecast(city).await {
            Ok(Some(payload)) => reduce_daily(&payload.list, FORECAST_DAYS),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, city, "Forecast lookup failed");
                Vec::new()
            }
        };
        if !self.apply(ticket, |d| d.forecast = forecast).await {
            return LookupOutcome::Superseded;
        }

        match self.proxy.history().await {
            Ok(history) => {
                if !self.apply(ticket, |d| d.history = history).await {
                    return LookupOutcome::Superseded;
                }
            }
            Err(e) => warn!(error = %e, "History refresh failed"),
        }

        LookupOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn forecast_body() -> serde_json::Value {
        let list: Vec<_> = (0..16)
            .map(|i| {
                json!({
                    "dt": 0,
                    "dt_txt": format!("2025-06-{:02} {:02}:00:00", 10 + i / 8, (i % 8) * 3),
                    "main": { "temp": f64::from(i) },
                    "weather": [{ "description": "clear sky", "icon": "01d" }]
                })
            })
            .collect();
        json!({ "cod": "200", "list": list })
    }

    async fn mount_city(server: &MockServer, city: &str, delay_ms: u64) {
        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .and(query_param("city", city))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "cod": 200, "name": city, "timezone": 0 }))
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(server)
            .await;
    }

    async fn mount_rest(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/weather/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/weather/history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;
    }

    #[test]
    fn test_sequencer_only_latest_is_current() {
        let sequencer = LookupSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_current(first));

        let second = sequencer.issue();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[tokio::test]
    async fn test_lookup_fills_dashboard() {
        let server = MockServer::start().await;
        mount_city(&server, "London", 0).await;
        mount_rest(&server).await;

        let session = WeatherSession::new(ProxyClient::new(Client::new(), &server.uri()));
        assert_eq!(session.lookup("London").await, LookupOutcome::Applied);

        let dashboard = session.dashboard().await;
        assert_eq!(
            dashboard.weather.and_then(|w| w.name).as_deref(),
            Some("London")
        );
        assert_eq!(dashboard.forecast.len(), 2);
        assert_eq!(dashboard.forecast[0].dt_txt, "2025-06-10 12:00:00");
    }

    #[tokio::test]
    async fn test_not_found_clears_weather() {
        let server = MockServer::start().await;
        mount_city(&server, "London", 0).await;
        mount_rest(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .and(query_param("city", "Atlantis"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "city not found" })),
            )
            .mount(&server)
            .await;

        let session = WeatherSession::new(ProxyClient::new(Client::new(), &server.uri()));
        session.lookup("London").await;
        assert_eq!(session.lookup("Atlantis").await, LookupOutcome::NotFound);
        assert!(session.dashboard().await.weather.is_none());
    }

    #[tokio::test]
    async fn test_slow_earlier_lookup_is_discarded() {
        let server = MockServer::start().await;
        mount_city(&server, "Paris", 400).await;
        mount_city(&server, "Rome", 0).await;
        mount_rest(&server).await;

        let session = WeatherSession::new(ProxyClient::new(Client::new(), &server.uri()));
        let slow = session.lookup("Paris");
        let fast = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            session.lookup("Rome").await
        };
        let (slow_outcome, fast_outcome) = tokio::join!(slow, fast);

        assert_eq!(slow_outcome, LookupOutcome::Superseded);
        assert_eq!(fast_outcome, LookupOutcome::Applied);
        assert_eq!(
            session.dashboard().await.weather.and_then(|w| w.name).as_deref(),
            Some("Rome")
        );
    }

    #[tokio::test]
    async fn test_unreachable_proxy_changes_nothing() {
        let session =
            WeatherSession::new(ProxyClient::new(Client::new(), "http://127.0.0.1:9"));
        assert_eq!(session.lookup("London").await, LookupOutcome::Failed);
        assert_eq!(session.dashboard().await, Dashboard::default());
    }
}
