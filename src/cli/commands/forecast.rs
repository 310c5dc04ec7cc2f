use super::proxy_client;
use crate::client::reduce_daily;
use crate::client::render::render_forecast;
use crate::config::Config;
use crate::constants::limits::FORECAST_DAYS;

pub async fn cmd_forecast(config: &Config, city: &str) -> anyhow::Result<()> {
    let city = city.trim();
    if city.is_empty() {
        println!("City is required");
        return Ok(());
    }

    let proxy = proxy_client(config)?;
    let Some(payload) = proxy.forecast(city).await? else {
        println!("No forecast available for '{city}'");
        return Ok(());
    };

    let daily = reduce_daily(&payload.list, FORECAST_DAYS);
    if daily.is_empty() {
        println!("No forecast available for '{city}'");
        return Ok(());
    }

    println!("Forecast for {city}");
    print!("{}", render_forecast(&daily));
    Ok(())
}
