//! Nearest-record selection for provider time series

use chrono::{DateTime, NaiveDateTime, Utc};

/// Index of the timestamp closest to `now`.
///
/// Entries without a timestamp are skipped. Ties go to the first record
/// encountered. Returns `None` when no entry has a timestamp.
pub fn nearest_index<I>(timestamps: I, now: DateTime<Utc>) -> Option<usize>
where
    I: IntoIterator<Item = Option<DateTime<Utc>>>,
{
    let mut best: Option<(usize, i64)> = None;

    for (index, timestamp) in timestamps.into_iter().enumerate() {
        let Some(timestamp) = timestamp else {
            continue;
        };
        let distance = (timestamp - now).num_seconds().abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}

/// Same as [`nearest_index`] for wall-clock times compared in one zone
pub fn nearest_local_index<I>(times: I, now_local: NaiveDateTime) -> Option<usize>
where
    I: IntoIterator<Item = Option<NaiveDateTime>>,
{
    nearest_index(
        times.into_iter().map(|t| t.map(|t| t.and_utc())),
        now_local.and_utc(),
    )
}

/// Parse a provider timestamp, with or without a numeric offset; naive
/// timestamps are taken as UTC
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z") {
        Some(dt.with_timezone(&Utc))
    } else if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        Some(dt.with_timezone(&Utc))
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        Some(naive.and_utc())
    } else {
        None
    }
}
