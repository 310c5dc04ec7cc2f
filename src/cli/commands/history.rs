use chrono::Utc;

use super::proxy_client;
use crate::client::render::render_history;
use crate::config::Config;
use crate::parser::city::normalize_city;

pub async fn cmd_history(config: &Config, city: Option<&str>) -> anyhow::Result<()> {
    let proxy = proxy_client(config)?;
    let mut records = proxy.history().await?;

    if let Some(city) = city {
        let wanted = normalize_city(city);
        records.retain(|r| r.city == wanted);

        if records.is_empty() {
            println!("'{wanted}' has not been searched recently.");
            return Ok(());
        }
    }

    print!("{}", render_history(&records, Utc::now()));
    Ok(())
}
