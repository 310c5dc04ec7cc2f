use chrono::{DateTime, NaiveDate, Utc};
use std::fmt::Write;

use super::local_time::local_time;
use crate::constants::provider::ICON_URL;
use crate::models::{CurrentWeather, ForecastEntry, SearchRecord};

#[must_use]
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_URL}/{icon}@2x.png")
}

fn format_temp(temp: Option<f64>) -> String {
    temp.map_or_else(|| "--".to_string(), |t| format!("{t:.1}°C"))
}

fn weekday_label(entry: &ForecastEntry) -> String {
    NaiveDate::parse_from_str(entry.date_key(), "%Y-%m-%d").map_or_else(
        |_| entry.date_key().to_string(),
        |date| date.format("%a, %b %-d").to_string(),
    )
}

#[must_use]
pub fn render_current(weather: &CurrentWeather, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let name = weather.name.as_deref().unwrap_or("Unknown");
    match weather.country() {
        Some(country) => {
            let _ = writeln!(out, "{name}, {country}");
        }
        None => {
            let _ = writeln!(out, "{name}");
        }
    }
    let _ = writeln!(out, "{:-<40}", "");

    let _ = writeln!(out, "  🌡️  Temperature: {}", format_temp(weather.temp()));
    if let Some(humidity) = weather.main.as_ref().and_then(|m| m.humidity) {
        let _ = writeln!(out, "  💧 Humidity:    {humidity:.0}%");
    }
    if let Some(speed) = weather.wind_speed() {
        let _ = writeln!(out, "  💨 Wind:        {speed:.1} m/s");
    }
    if let Some(condition) = weather.condition() {
        if let Some(description) = &condition.description {
            let _ = writeln!(out, "  ☁️  Conditions:  {description}");
        }
        if let Some(icon) = &condition.icon {
            let _ = writeln!(out, "     {}", icon_url(icon));
        }
    }
    if let Some(offset) = weather.timezone {
        let _ = writeln!(out, "  🕒 Local time:  {}", local_time(offset, now));
    }

    out
}

#[must_use]
pub fn render_forecast(entries: &[ForecastEntry]) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        return out;
    }

    let _ = writeln!(out, "📅 {}-Day Forecast", entries.len());
    let _ = writeln!(out, "{:-<40}", "");
    for entry in entries {
        let condition = entry.condition();
        let description = condition
            .and_then(|c| c.description.as_deref())
            .unwrap_or("");
        let _ = write!(
            out,
            "  {:<14} {:>8}  {}",
            weekday_label(entry),
            format_temp(entry.main.temp),
            description
        );
        if let Some(icon) = condition.and_then(|c| c.icon.as_deref()) {
            let _ = write!(out, "  {}", icon_url(icon));
        }
        out.push('\n');
    }

    out
}

#[must_use]
pub fn render_history(records: &[SearchRecord], now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🕘 Recent Searches");
    let _ = writeln!(out, "{:-<40}", "");
    if records.is_empty() {
        let _ = writeln!(out, "  No searches yet.");
        return out;
    }

    for record in records {
        let _ = write!(out, "  {:<20} {:>8}", record.city, format_temp(record.temp));
        if let Some(description) = &record.description {
            let _ = write!(out, "  {description}");
        }
        if let Some(offset) = record.timezone {
            let _ = write!(out, "  (local {})", local_time(offset, now));
        }
        let _ = write!(
            out,
            "  searched {}",
            record.searched_at.format("%Y-%m-%d %H:%M UTC")
        );
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_render_current() {
        let weather = CurrentWeather::from_payload(&json!({
            "cod": 200,
            "name": "London",
            "sys": { "country": "GB" },
            "main": { "temp": 15.2, "humidity": 71 },
            "wind": { "speed": 4.1 },
            "weather": [{ "description": "light rain", "icon": "10d" }],
            "timezone": 3600
        }));

        let text = render_current(&weather, noon());
        assert!(text.starts_with("London, GB\n"));
        assert!(text.contains("15.2°C"));
        assert!(text.contains("4.1 m/s"));
        assert!(text.contains("light rain"));
        assert!(text.contains("https://openweathermap.org/img/wn/10d@2x.png"));
        assert!(text.contains("13:00"));
    }

    #[test]
    fn test_render_forecast_labels_days() {
        let entry: ForecastEntry = serde_json::from_value(json!({
            "dt": 0,
            "dt_txt": "2025-06-10 12:00:00",
            "main": { "temp": 21.0 },
            "weather": [{ "description": "clear sky", "icon": "01d" }]
        }))
        .unwrap();

        let text = render_forecast(&[entry]);
        assert!(text.contains("1-Day Forecast"));
        assert!(text.contains("Tue, Jun 10"));
        assert!(text.contains("21.0°C"));
        assert!(text.contains("01d@2x.png"));
        assert!(render_forecast(&[]).is_empty());
    }

    #[test]
    fn test_render_history_rows() {
        let record = SearchRecord {
            id: 1,
            city: "London".to_string(),
            temp: Some(15.2),
            description: Some("light rain".to_string()),
            icon: Some("10d".to_string()),
            timezone: Some(3600),
            searched_at: noon(),
            created_at: noon(),
            updated_at: noon(),
        };

        let text = render_history(&[record], noon());
        assert!(text.contains("London"));
        assert!(text.contains("15.2°C"));
        assert!(text.contains("light rain"));
        assert!(text.contains("(local 13:00)"));
        assert!(text.contains("searched 2025-06-10 12:00 UTC"));
    }

    #[test]
    fn test_render_empty_history() {
        assert!(render_history(&[], noon()).contains("No searches yet."));
    }
}
