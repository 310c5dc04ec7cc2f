use chrono::{DateTime, Duration, Utc};

/// Wall-clock time at a location `offset_secs` east of UTC, as `HH:MM`.
#[must_use]
pub fn local_time(offset_secs: i32, now: DateTime<Utc>) -> String {
    (now + Duration::seconds(i64::from(offset_secs)))
        .format("%H:%M")
        .to_string()
}
