//! Shared fixtures for provider normalizer tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Value, json};

pub mod forecast_tests;

/// Madrid zone used by all fixtures
pub const TEST_ZONE: &str = "Europe/Madrid";

/// Reference instant: 16 October 2026, 10:00 UTC (12:00 local)
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap()
}

/// Forecast payload with three steps around `test_now`; the middle step
/// (one hour ahead) is the nearest
pub fn forecast_payload() -> Value {
    let now = test_now();
    let steps: Vec<i64> = [-3, 1, 4]
        .iter()
        .map(|h| (now + Duration::hours(*h)).timestamp_millis())
        .collect();

    json!({
        "ts": steps,
        "units": {
            "wind_u-surface": "m*s-1",
            "temp-surface": "K",
            "pressure-surface": "Pa",
            "past3hprecip-surface": "m"
        },
        "wind_u-surface": [3.0, 0.0, -2.0],
        "wind_v-surface": [3.0, -5.0, 1.0],
        "gust-surface": [6.0, 10.0, 4.0],
        "temp-surface": [285.15, 288.15, 290.15],
        "dewpoint-surface": [280.15, 281.15, 282.15],
        "pressure-surface": [101100.0, 101300.0, 101500.0],
        "past3hprecip-surface": [0.0, 0.0005, 0.0],
        "lclouds-surface": [0.0, 30.0, 0.0],
        "mclouds-surface": [0.0, 60.0, 0.0],
        "hclouds-surface": [0.0, 0.0, 0.0]
    })
}

/// One agency observation record
pub fn observation(fint: &str, fields: Value) -> Value {
    let mut record = json!({ "idema": "3196", "fint": fint });
    if let (Some(record), Some(fields)) = (record.as_object_mut(), fields.as_object()) {
        for (key, value) in fields {
            record.insert(key.clone(), value.clone());
        }
    }
    record
}

/// Municipal prediction for 16 October with the given (hour, code, description) entries
pub fn prediction(entries: &[(&str, &str, &str)]) -> Value {
    let sky: Vec<Value> = entries
        .iter()
        .map(|(hour, code, description)| {
            json!({ "value": code, "periodo": hour, "descripcion": description })
        })
        .collect();

    json!([{
        "nombre": "Madrid",
        "prediccion": {
            "dia": [{
                "fecha": "2026-10-16T00:00:00",
                "estadoCielo": sky
            }]
        }
    }])
}

/// Station text as it reads after the page is cleaned of markup
pub const STATION_TEXT: &str = "Cuatro Vientos weather station
Updated: 16/10/2026 12:20
Temperature: 18.4 °C
Wind: 15 km/h N
Pressure: 1016.2 hPa
Sunrise: 08:21
Sunset: 19:19
";
