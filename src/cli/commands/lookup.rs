use chrono::Utc;
use tracing::debug;

use super::proxy_client;
use crate::client::render::{render_current, render_forecast, render_history};
use crate::client::{LookupOutcome, WeatherSession};
use crate::config::Config;

pub async fn cmd_lookup(config: &Config, city: &str) -> anyhow::Result<()> {
    let city = city.trim();
    if city.is_empty() {
        println!("City is required");
        return Ok(());
    }

    let session = WeatherSession::new(proxy_client(config)?);
    show_lookup(&session, city, &config.client.api_url).await
}

pub(super) async fn show_lookup(
    session: &WeatherSession,
    city: &str,
    api_url: &str,
) -> anyhow::Result<()> {
    println!("Looking up: {city}");
    println!();

    match session.lookup(city).await {
        LookupOutcome::Applied => {
            let dashboard = session.dashboard().await;
            let now = Utc::now();

            if let Some(weather) = &dashboard.weather {
                println!("{}", render_current(weather, now));
            }
            if !dashboard.forecast.is_empty() {
                println!("{}", render_forecast(&dashboard.forecast));
            }
            print!("{}", render_history(&dashboard.history, now));
        }
        LookupOutcome::NotFound => {
            println!("No weather found for '{city}'");
        }
        LookupOutcome::Failed => {
            anyhow::bail!("Could not reach the weather server at {api_url}");
        }
        LookupOutcome::Superseded => {
            debug!(city, "Lookup superseded");
        }
    }

    Ok(())
}
