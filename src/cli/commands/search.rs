use std::io::Write;

use super::lookup::show_lookup;
use super::proxy_client;
use crate::client::{Autocomplete, Key, WeatherSession};
use crate::clients::geodb::GeoDbClient;
use crate::config::Config;
use crate::state::build_shared_http_client;

pub async fn cmd_search(config: &Config, query: &str) -> anyhow::Result<()> {
    let http = build_shared_http_client(config.client.request_timeout_seconds.into())?;
    let geodb = GeoDbClient::new(http, &config.geocoding);

    let mut autocomplete = Autocomplete::new(config.geocoding.min_query_len);
    if autocomplete.set_input(query) {
        autocomplete.set_suggestions(geodb.suggest(query).await);
    }

    let suggestions = autocomplete.suggestions();
    if suggestions.is_empty() {
        println!("No suggestions for '{}'", query.trim());
    } else {
        println!("Suggestions:");
        println!("{:-<40}", "");
        for (i, s) in suggestions.iter().enumerate() {
            if s.country.is_empty() {
                println!("[{}] {}", i + 1, s.name);
            } else {
                println!("[{}] {}, {}", i + 1, s.name, s.country);
            }
        }
        println!();
        print!(
            "Select a city (1-{}), press Enter to search '{}' as typed, or 'q' to cancel: ",
            suggestions.len(),
            query.trim()
        );
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.eq_ignore_ascii_case("q") {
            println!("Cancelled.");
            return Ok(());
        }

        if !input.is_empty() {
            match input.parse::<usize>() {
                Ok(n) if (1..=suggestions.len()).contains(&n) => {
                    for _ in 0..n {
                        autocomplete.on_key(Key::Down);
                    }
                }
                _ => {
                    println!("Invalid selection.");
                    return Ok(());
                }
            }
        }
    }

    let Some(submission) = autocomplete.on_key(Key::Enter) else {
        println!("City is required");
        return Ok(());
    };

    let session = WeatherSession::new(proxy_client(config)?);
    show_lookup(&session, submission.city(), &config.client.api_url).await
}
