use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::models::ForecastEntry;

fn slot_time(entry: &ForecastEntry) -> Option<(NaiveDate, Option<NaiveTime>)> {
    let text = entry.dt_txt.trim();
    if let Ok(at) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some((at.date(), Some(at.time())));
    }
    if let Ok(date) = NaiveDate::parse_from_str(entry.date_key().trim(), "%Y-%m-%d") {
        return Some((date, None));
    }

    (entry.dt > 0)
        .then(|| DateTime::from_timestamp(entry.dt, 0))
        .flatten()
        .map(|at| (at.date_naive(), Some(at.time())))
}

fn noon_distance(time: Option<NaiveTime>) -> i64 {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    time.map_or(i64::MAX, |t| (t - noon).num_seconds().abs())
}

/// Collapses the provider's 3-hour slots to one slot per calendar day.
///
/// For each date the slot closest to 12:00 wins; on a tie the slot seen first
/// is kept, as is the first slot of a date whose times cannot be read. Dates
/// come out in ascending order and at most `max_days` are returned. Slots
/// without a readable date are ignored.
#[must_use]
pub fn reduce_daily(entries: &[ForecastEntry], max_days: usize) -> Vec<ForecastEntry> {
    let mut by_date: BTreeMap<NaiveDate, (&ForecastEntry, i64)> = BTreeMap::new();

    for entry in entries {
        let Some((date, time)) = slot_time(entry) else {
            continue;
        };
        let distance = noon_distance(time);

        match by_date.entry(date) {
            Entry::Vacant(slot) => {
                slot.insert((entry, distance));
            }
            Entry::Occupied(mut slot) => {
                if distance < slot.get().1 {
                    slot.insert((entry, distance));
                }
            }
        }
    }

    by_date
        .into_values()
        .take(max_days)
        .map(|(entry, _)| entry.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weather::MainReadings;

    fn slot(dt_txt: &str, temp: f64) -> ForecastEntry {
        ForecastEntry {
            dt: 0,
            dt_txt: dt_txt.to_string(),
            main: MainReadings {
                temp: Some(temp),
                humidity: None,
            },
            weather: Vec::new(),
        }
    }

    fn three_hourly(days: &[&str]) -> Vec<ForecastEntry> {
        days.iter()
            .flat_map(|day| {
                (0..8).map(move |i| slot(&format!("{day} {:02}:00:00", i * 3), f64::from(i)))
            })
            .collect()
    }

    #[test]
    fn test_five_noon_slots() {
        let days = ["2025-06-10", "2025-06-11", "2025-06-12", "2025-06-13", "2025-06-14"];
        let reduced = reduce_daily(&three_hourly(&days), 5);

        assert_eq!(reduced.len(), 5);
        for (entry, day) in reduced.iter().zip(days) {
            assert_eq!(entry.dt_txt, format!("{day} 12:00:00"));
        }
    }

    #[test]
    fn test_truncates_to_first_five_dates() {
        let days = [
            "2025-06-10",
            "2025-06-11",
            "2025-06-12",
            "2025-06-13",
            "2025-06-14",
            "2025-06-15",
        ];
        let reduced = reduce_daily(&three_hourly(&days), 5);

        assert_eq!(reduced.len(), 5);
        assert_eq!(reduced[0].date_key(), "2025-06-10");
        assert_eq!(reduced[4].date_key(), "2025-06-14");
    }

    #[test]
    fn test_partial_day_picks_closest_to_noon() {
        let entries = vec![
            slot("2025-06-10 18:00:00", 1.0),
            slot("2025-06-10 21:00:00", 2.0),
            slot("2025-06-11 00:00:00", 3.0),
            slot("2025-06-11 03:00:00", 4.0),
            slot("2025-06-11 09:00:00", 5.0),
        ];
        let reduced = reduce_daily(&entries, 5);

        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].dt_txt, "2025-06-10 18:00:00");
        assert_eq!(reduced[1].dt_txt, "2025-06-11 09:00:00");
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let entries = vec![
            slot("2025-06-10 09:00:00", 1.0),
            slot("2025-06-10 15:00:00", 2.0),
        ];
        let reduced = reduce_daily(&entries, 5);
        assert_eq!(reduced[0].dt_txt, "2025-06-10 09:00:00");
    }

    #[test]
    fn test_unordered_input_comes_out_by_date() {
        let entries = vec![
            slot("2025-06-12 12:00:00", 3.0),
            slot("2025-06-10 12:00:00", 1.0),
            slot("2025-06-11 12:00:00", 2.0),
        ];
        let dates: Vec<_> = reduce_daily(&entries, 5)
            .iter()
            .map(|e| e.date_key().to_string())
            .collect();
        assert_eq!(dates, ["2025-06-10", "2025-06-11", "2025-06-12"]);
    }

    #[test]
    fn test_falls_back_to_unix_timestamp() {
        let mut entry = slot("", 7.0);
        entry.dt = 1_749_556_800; // 2025-06-10 12:00:00 UTC
        let reduced = reduce_daily(&[entry, slot("garbage", 1.0)], 5);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].main.temp, Some(7.0));
    }

    #[test]
    fn test_unreadable_times_keep_first_slot() {
        let entries = vec![
            slot("2025-06-10 late", 1.0),
            slot("2025-06-10 later", 2.0),
            slot("2025-06-11 soon", 3.0),
            slot("2025-06-11 15:00:00", 4.0),
        ];
        let reduced = reduce_daily(&entries, 5);

        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].main.temp, Some(1.0));
        assert_eq!(reduced[1].main.temp, Some(4.0));
    }

    #[test]
    fn test_reduction_is_idempotent() {
        let entries = three_hourly(&["2025-06-10", "2025-06-11", "2025-06-12"]);
        let once = reduce_daily(&entries, 5);
        assert_eq!(reduce_daily(&once, 5), once);
        assert_eq!(reduce_daily(&entries, 5), once);
    }
}
