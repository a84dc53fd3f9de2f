//! Local station text normalization
//!
//! The station page, once cleaned of markup, is a block of `Label: value`
//! lines. Parsing first produces a [`StationRecord`] (the raw key/value
//! record kept for diagnostics) and then a partial snapshot from it.
//!
//! Wind direction arrives as 16-point compass letters and is kept to whole
//! degrees; north is 360.

use super::Provider;
use crate::app::models::{CanonicalSnapshot, ObservationTime};
use crate::app::services::time_normalizer::parse_local;
use crate::app::services::units::kmh_to_knots;
use crate::constants::COMPASS_POINTS;
use crate::error::{AtisError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Labels that carry a measurement; at least one must be present
const MEASUREMENT_LABELS: &[&str] = &["temperature", "wind", "pressure"];

static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(updated|temperature|wind|pressure|sunrise|sunset)[ \t]*:[ \t]*(.+?)[ \t\r]*$")
        .expect("static regex is valid")
});

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:[.,]\d+)?").expect("static regex is valid"));

static WIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:[.,]\d+)?)\s*km/h(?:\s+([NESW]{1,3}))?\s*$")
        .expect("static regex is valid")
});

/// Fixed key/value record read from the station text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationRecord {
    fields: BTreeMap<String, String>,
}

impl StationRecord {
    /// Raw value of a label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse cleaned station text into a record.
///
/// Fails when the update time is missing or no measurement label is found,
/// which means the page did not have the expected shape.
pub fn parse_record(text: &str) -> Result<StationRecord> {
    let mut fields = BTreeMap::new();
    for captures in FIELD_LINE.captures_iter(text) {
        let label = captures[1].to_lowercase();
        // First occurrence wins
        fields
            .entry(label)
            .or_insert_with(|| captures[2].to_string());
    }

    if !fields.contains_key("updated") {
        return Err(parse_error("update time not found"));
    }
    if !MEASUREMENT_LABELS.iter().any(|l| fields.contains_key(*l)) {
        return Err(parse_error("no measurement labels found"));
    }

    Ok(StationRecord { fields })
}

/// Partial snapshot from a station record.
///
/// Values that do not parse are left absent. `zone` is the station's civil
/// time zone used for the update time.
pub fn normalize(record: &StationRecord, zone: &str) -> CanonicalSnapshot {
    let mut snapshot = CanonicalSnapshot {
        temperature: record.get("temperature").and_then(first_number),
        qnh: record
            .get("pressure")
            .and_then(first_number)
            .filter(|p| *p > 0.0),
        observation_time: record.get("updated").map(|text| updated_time(text, zone)),
        ..Default::default()
    };

    if let Some((speed, direction)) = record.get("wind").and_then(parse_wind) {
        snapshot.wind_speed = Some(speed);
        snapshot.wind_direction = direction;
    }

    snapshot
}

/// Degrees for a 16-point compass abbreviation
pub fn compass_to_degrees(letters: &str) -> Option<u16> {
    let letters = letters.trim().to_uppercase();
    COMPASS_POINTS
        .iter()
        .find(|(point, _)| *point == letters)
        .map(|&(_, degrees)| degrees)
}

/// Wind speed in knots and optional bearing; calm has no bearing
fn parse_wind(text: &str) -> Option<(u32, Option<u16>)> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("calm") {
        return Some((0, None));
    }

    let captures = WIND.captures(trimmed)?;
    let kmh: f64 = captures[1].replace(',', ".").parse().ok()?;
    let speed = kmh_to_knots(kmh);
    let direction = captures
        .get(2)
        .and_then(|m| compass_to_degrees(m.as_str()))
        .filter(|_| speed > 0);
    Some((speed, direction))
}

/// `DD/MM/YYYY HH:MM` local time converted to UTC
fn updated_time(text: &str, zone: &str) -> ObservationTime {
    let mut parts = text.split_whitespace();
    let date = parts.next().unwrap_or_default();
    let time = parts.next().unwrap_or_default();
    parse_local(date, time, zone)
}

fn first_number(text: &str) -> Option<f64> {
    NUMBER
        .find(text)
        .and_then(|m| m.as_str().replace(',', ".").parse().ok())
}

fn parse_error(message: &str) -> AtisError {
    AtisError::provider_parse(Provider::Station.name(), message)
}
