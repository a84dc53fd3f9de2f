//! National weather agency normalization
//!
//! The agency contributes two document families: hourly observations from a
//! pair of nearby stations, and the municipal hourly prediction whose sky
//! state gives cloud cover and present weather. The primary station wins
//! over the secondary one; the secondary only fills its gaps.

use super::Provider;
use super::nearest::{nearest_index, nearest_local_index, parse_timestamp};
use crate::app::models::{CanonicalSnapshot, CloudLayer, Phenomenon, SkyCover};
use crate::app::services::fusion::merge;
use crate::app::services::time_normalizer::{civil_in_zone, from_utc};
use crate::app::services::units::mps_to_knots;
use crate::app::services::wind::round_bearing;
use crate::error::{AtisError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

// =============================================================================
// Payload Structures
// =============================================================================

/// Documents retrieved from the agency; any of them may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgencyPayload {
    /// Observations of the primary station
    pub primary: Option<Value>,

    /// Observations of the secondary station
    pub secondary: Option<Value>,

    /// Municipal hourly prediction
    pub prediction: Option<Value>,
}

/// One hourly observation record
#[derive(Debug, Clone, Default, Deserialize)]
struct StationObservation {
    /// End of the observation period
    fint: Option<String>,
    /// Mean wind speed, m/s
    vv: Option<f64>,
    /// Mean wind direction, degrees
    dv: Option<f64>,
    /// Maximum gust, m/s
    vmax: Option<f64>,
    /// Direction of the maximum gust, degrees
    dmax: Option<f64>,
    /// Sea-level pressure, hPa
    pres_nmar: Option<f64>,
    /// Air temperature, Celsius
    ta: Option<f64>,
    /// Dew point, Celsius
    tpr: Option<f64>,
    /// Visibility, km
    vis: Option<f64>,
    /// Precipitation, mm
    prec: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MunicipalPrediction {
    prediccion: PredictionBody,
}

#[derive(Debug, Deserialize)]
struct PredictionBody {
    #[serde(default)]
    dia: Vec<PredictionDay>,
}

#[derive(Debug, Deserialize)]
struct PredictionDay {
    fecha: String,
    #[serde(rename = "estadoCielo", default)]
    estado_cielo: Vec<SkyState>,
}

#[derive(Debug, Deserialize)]
struct SkyState {
    value: Option<String>,
    periodo: Option<String>,
    descripcion: Option<String>,
}

/// Sky condition decoded from a prediction entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyReading {
    pub octas: Option<u8>,
    pub phenomenon: Phenomenon,
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalize the agency documents into a partial snapshot.
///
/// `zone` is the aerodrome's civil time zone, used to line the municipal
/// prediction's local hours up with `now`.
pub fn normalize(
    payload: &AgencyPayload,
    now: DateTime<Utc>,
    zone: &str,
) -> Result<CanonicalSnapshot> {
    if payload.primary.is_none() && payload.secondary.is_none() && payload.prediction.is_none() {
        return Err(parse_error("no documents retrieved"));
    }

    let primary = payload
        .primary
        .as_ref()
        .map(|doc| observation_snapshot(doc, now))
        .transpose()?
        .unwrap_or_default();
    let secondary = payload
        .secondary
        .as_ref()
        .map(|doc| observation_snapshot(doc, now))
        .transpose()?
        .unwrap_or_default();

    let mut snapshot = merge(secondary, &primary);

    if let Some(prediction) = &payload.prediction {
        match predicted_sky(prediction, now, zone) {
            Ok(Some(reading)) => apply_sky(&mut snapshot, reading),
            Ok(None) => {}
            // Observations still stand without a sky reading
            Err(e) if payload.primary.is_some() || payload.secondary.is_some() => {
                warn!("Skipping agency sky reading: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(snapshot)
}

/// Snapshot for the observation record nearest `now`
fn observation_snapshot(document: &Value, now: DateTime<Utc>) -> Result<CanonicalSnapshot> {
    let records: Vec<StationObservation> = serde_json::from_value(document.clone())
        .map_err(|e| parse_error(&format!("observation records: {}", e)))?;

    let timestamps: Vec<Option<DateTime<Utc>>> = records
        .iter()
        .map(|r| r.fint.as_deref().and_then(parse_timestamp))
        .collect();

    let Some(index) = nearest_index(timestamps.iter().copied(), now) else {
        debug!("Agency observation document has no timestamped records");
        return Ok(CanonicalSnapshot::default());
    };
    let record = &records[index];

    let wind_speed = record.vv.map(|v| mps_to_knots(v).round() as u32);
    let calm = wind_speed == Some(0);

    Ok(CanonicalSnapshot {
        wind_direction: record.dv.filter(|_| !calm).map(round_bearing),
        wind_speed,
        gust_direction: record.dmax.map(round_bearing),
        gust_speed: record.vmax.map(|v| mps_to_knots(v).round() as u32),
        visibility: record.vis.filter(|v| *v >= 0.0),
        temperature: record.ta,
        dew_point: record.tpr,
        qnh: record.pres_nmar.filter(|p| *p > 0.0),
        precipitation: record.prec.filter(|p| *p >= 0.0),
        observation_time: timestamps[index].map(from_utc),
        ..Default::default()
    })
}

/// Sky reading for the prediction hour nearest `now`
fn predicted_sky(document: &Value, now: DateTime<Utc>, zone: &str) -> Result<Option<SkyReading>> {
    // The prediction is delivered as a one-element array
    let body = match document {
        Value::Array(items) => items
            .first()
            .cloned()
            .ok_or_else(|| parse_error("empty prediction document"))?,
        other => other.clone(),
    };
    let prediction: MunicipalPrediction = serde_json::from_value(body)
        .map_err(|e| parse_error(&format!("prediction document: {}", e)))?;

    let entries: Vec<(Option<NaiveDateTime>, &SkyState)> = prediction
        .prediccion
        .dia
        .iter()
        .flat_map(|day| {
            let date = day
                .fecha
                .get(..10)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
            day.estado_cielo.iter().map(move |state| {
                let hour = state
                    .periodo
                    .as_deref()
                    .and_then(|p| p.trim().parse::<u32>().ok());
                let local = date.zip(hour).and_then(|(d, h)| d.and_hms_opt(h, 0, 0));
                (local, state)
            })
        })
        .collect();

    let local_now = civil_in_zone(now, zone)?;
    let Some(now_naive) = NaiveDate::from_ymd_opt(local_now.year, local_now.month, local_now.day)
        .and_then(|d| d.and_hms_opt(local_now.hour, local_now.minute, 0))
    else {
        return Ok(None);
    };

    let Some(index) = nearest_local_index(entries.iter().map(|(t, _)| *t), now_naive) else {
        return Ok(None);
    };
    let state = entries[index].1;

    Ok(sky_from_code(state.value.as_deref())
        .or_else(|| sky_from_description(state.descripcion.as_deref())))
}

fn apply_sky(snapshot: &mut CanonicalSnapshot, reading: SkyReading) {
    if let Some(octas) = reading.octas {
        snapshot.sky_octas = Some(octas);
        snapshot.cloud_layers = Some(vec![if octas == 0 {
            CloudLayer::sky_clear()
        } else {
            CloudLayer {
                cover: SkyCover::from_octas(octas),
                altitude_ft: None,
            }
        }]);
    }
    snapshot.phenomenon = Some(reading.phenomenon);
}

// =============================================================================
// Sky State Decoding
// =============================================================================

/// Decode a numeric sky code such as `12`, `43n` or `81`.
///
/// The tens digit carries the weather (1 dry, 2 rain, 3 snow, 4 light rain,
/// 5 and 6 storm, 7 light snow, 8 obscuration) and the units digit the cloud
/// amount. A trailing `n` marks night-time and is ignored.
pub fn sky_from_code(code: Option<&str>) -> Option<SkyReading> {
    let code: u8 = code?.trim().trim_end_matches('n').parse().ok()?;

    match code {
        81 => Some(SkyReading {
            octas: None,
            phenomenon: Phenomenon::Fog,
        }),
        82 => Some(SkyReading {
            octas: None,
            phenomenon: Phenomenon::Mist,
        }),
        83 => Some(SkyReading {
            octas: None,
            phenomenon: Phenomenon::Haze,
        }),
        11..=79 => {
            let phenomenon = match code / 10 {
                1 => Phenomenon::None,
                2 => Phenomenon::Rain,
                3 => Phenomenon::Snow,
                4 => Phenomenon::LightRain,
                5 | 6 => Phenomenon::Thunderstorm,
                _ => Phenomenon::LightSnow,
            };
            let octas = match code % 10 {
                1 => 0,
                2 | 7 => 2,
                3 => 4,
                4 | 5 => 7,
                6 => 8,
                _ => return None,
            };
            Some(SkyReading {
                octas: Some(octas),
                phenomenon,
            })
        }
        _ => None,
    }
}

/// Decode the textual sky descriptor when no usable code is present
pub fn sky_from_description(description: Option<&str>) -> Option<SkyReading> {
    let text = description?.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let light = text.contains("escasa");
    let phenomenon = if text.contains("tormenta") {
        Phenomenon::Thunderstorm
    } else if text.contains("nieve") {
        if light { Phenomenon::LightSnow } else { Phenomenon::Snow }
    } else if text.contains("chubasco") {
        Phenomenon::Showers
    } else if text.contains("lluvia") {
        if light { Phenomenon::LightRain } else { Phenomenon::Rain }
    } else if text.contains("niebla") {
        Phenomenon::Fog
    } else if text.contains("bruma") {
        Phenomenon::Mist
    } else if text.contains("calima") {
        Phenomenon::Haze
    } else {
        Phenomenon::None
    };

    // Longer phrases first: "muy nuboso" and "poco nuboso" contain "nuboso"
    let octas = [
        ("despejado", 0),
        ("poco nuboso", 2),
        ("nubes altas", 2),
        ("intervalos nubosos", 4),
        ("muy nuboso", 7),
        ("nuboso", 7),
        ("cubierto", 8),
    ]
    .iter()
    .find(|(phrase, _)| text.contains(phrase))
    .map(|&(_, octas)| octas);

    if octas.is_none() && phenomenon == Phenomenon::None {
        return None;
    }
    Some(SkyReading { octas, phenomenon })
}

fn parse_error(message: &str) -> AtisError {
    AtisError::provider_parse(Provider::Agency.name(), message)
}
