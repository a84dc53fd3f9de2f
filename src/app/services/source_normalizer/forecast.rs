//! Forecast-model point forecast normalization
//!
//! The payload is a time index (`ts`, epoch milliseconds) plus one array per
//! parameter, all indexed in parallel. The step nearest to now is selected
//! and its values converted to report units.

use super::Provider;
use super::nearest::nearest_index;
use crate::app::models::{CanonicalSnapshot, Phenomenon};
use crate::app::services::clouds::{LayerCover, estimate_layers, total_octas};
use crate::app::services::time_normalizer::from_utc;
use crate::app::services::units::{kelvin_to_celsius, mps_to_knots, pa_to_hpa};
use crate::app::services::wind::WindVector;
use crate::constants::{FORECAST_RAIN_THRESHOLD_MM, forecast_params as params};
use crate::error::{AtisError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

/// Normalize a forecast payload into a partial snapshot for the step nearest `now`
pub fn normalize(payload: &Value, now: DateTime<Utc>) -> Result<CanonicalSnapshot> {
    let steps = payload
        .get(params::TIMESTAMPS)
        .and_then(Value::as_array)
        .ok_or_else(|| parse_error("missing time index"))?;

    let timestamps: Vec<Option<DateTime<Utc>>> = steps
        .iter()
        .map(|ts| ts.as_i64().and_then(DateTime::from_timestamp_millis))
        .collect();

    let index = nearest_index(timestamps.iter().copied(), now)
        .ok_or_else(|| parse_error("time index has no usable steps"))?;

    debug!(
        "Forecast step {} of {} selected ({:?})",
        index,
        steps.len(),
        timestamps[index]
    );

    let step = ForecastStep { payload, index };
    let mut snapshot = CanonicalSnapshot {
        observation_time: timestamps[index].map(from_utc),
        ..Default::default()
    };

    if let (Some(u), Some(v)) = (step.value(params::WIND_U), step.value(params::WIND_V)) {
        let wind = WindVector::from_components(u, v);
        let speed = wind.rounded_speed();
        snapshot.wind_speed = Some(speed);
        // A calm vector has no meaningful direction
        snapshot.wind_direction = (speed > 0).then(|| wind.bearing_to_ten());
    }

    snapshot.gust_speed = step
        .value(params::GUST)
        .map(|gust| mps_to_knots(gust).round() as u32);
    snapshot.temperature = step.value(params::TEMPERATURE).map(kelvin_to_celsius);
    snapshot.dew_point = step.value(params::DEW_POINT).map(kelvin_to_celsius);
    snapshot.qnh = step.value(params::PRESSURE).map(pa_to_hpa);

    snapshot.precipitation = step
        .value(params::PRECIPITATION)
        .map(|amount| precipitation_mm(payload, amount).max(0.0));
    snapshot.phenomenon = snapshot.precipitation.map(|mm| {
        if mm >= FORECAST_RAIN_THRESHOLD_MM {
            Phenomenon::Rain
        } else {
            Phenomenon::None
        }
    });

    let low = step.value(params::LOW_CLOUDS);
    let mid = step.value(params::MID_CLOUDS);
    let high = step.value(params::HIGH_CLOUDS);
    if low.is_some() || mid.is_some() || high.is_some() {
        let cover = LayerCover {
            low: low.unwrap_or(0.0),
            mid: mid.unwrap_or(0.0),
            high: high.unwrap_or(0.0),
        };
        let layers = estimate_layers(cover, snapshot.qnh);
        snapshot.sky_octas = Some(total_octas(&layers));
        snapshot.cloud_layers = Some(layers);
    }

    Ok(snapshot)
}

/// One selected step across the parallel parameter arrays
struct ForecastStep<'a> {
    payload: &'a Value,
    index: usize,
}

impl ForecastStep<'_> {
    /// Finite value of `key` at this step, absent when missing or null
    fn value(&self, key: &str) -> Option<f64> {
        self.payload
            .get(key)?
            .as_array()?
            .get(self.index)?
            .as_f64()
            .filter(|v| v.is_finite())
    }
}

/// Precipitation in millimetres, honouring the unit the payload declares
fn precipitation_mm(payload: &Value, amount: f64) -> f64 {
    let unit = payload
        .get(params::UNITS)
        .and_then(|units| units.get(params::PRECIPITATION))
        .and_then(Value::as_str);
    match unit {
        Some("m") => amount * 1000.0,
        _ => amount,
    }
}

fn parse_error(message: &str) -> AtisError {
    AtisError::provider_parse(Provider::Forecast.name(), message)
}
