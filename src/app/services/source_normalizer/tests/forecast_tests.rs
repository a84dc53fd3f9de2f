//! Tests for forecast-model normalization

use super::{forecast_payload, test_now};
use crate::app::models::{CloudLayer, ObservationTime, Phenomenon, SkyCover};
use crate::app::services::source_normalizer::forecast::normalize;
use crate::error::AtisError;
use serde_json::json;

#[test]
fn test_selects_step_nearest_now() {
    let snapshot = normalize(&forecast_payload(), test_now()).unwrap();
    assert_eq!(snapshot.observation_time, ObservationTime::utc(11, 0));
    assert!((snapshot.temperature.unwrap() - 15.0).abs() < 1e-9);
}

#[test]
fn test_converts_units() {
    let snapshot = normalize(&forecast_payload(), test_now()).unwrap();

    // 5 m/s from the north
    assert_eq!(snapshot.wind_speed, Some(10));
    assert_eq!(snapshot.wind_direction, Some(360));
    assert_eq!(snapshot.gust_speed, Some(19));
    assert!((snapshot.dew_point.unwrap() - 8.0).abs() < 1e-9);
    assert!((snapshot.qnh.unwrap() - 1013.0).abs() < 1e-9);
    assert!((snapshot.precipitation.unwrap() - 0.5).abs() < 1e-9);
    assert_eq!(snapshot.phenomenon, Some(Phenomenon::Rain));
}

#[test]
fn test_estimates_cloud_layers_from_qnh() {
    let snapshot = normalize(&forecast_payload(), test_now()).unwrap();
    assert_eq!(
        snapshot.cloud_layers,
        Some(vec![
            CloudLayer {
                cover: SkyCover::Scattered,
                altitude_ft: Some(1700),
            },
            CloudLayer {
                cover: SkyCover::Broken,
                altitude_ft: Some(5800),
            },
        ])
    );
    assert_eq!(snapshot.sky_octas, Some(7));
}

#[test]
fn test_calm_wind_has_no_direction() {
    let mut payload = forecast_payload();
    payload["wind_u-surface"] = json!([0.0, 0.0, 0.0]);
    payload["wind_v-surface"] = json!([0.0, 0.0, 0.0]);

    let snapshot = normalize(&payload, test_now()).unwrap();
    assert_eq!(snapshot.wind_speed, Some(0));
    assert_eq!(snapshot.wind_direction, None);
}

#[test]
fn test_missing_parameters_stay_absent() {
    let now = test_now();
    let payload = json!({
        "ts": [now.timestamp_millis()],
        "temp-surface": [null]
    });

    let snapshot = normalize(&payload, now).unwrap();
    assert_eq!(snapshot.temperature, None);
    assert_eq!(snapshot.wind_speed, None);
    assert_eq!(snapshot.cloud_layers, None);
    assert_eq!(snapshot.phenomenon, None);
    assert_eq!(snapshot.observation_time, ObservationTime::utc(10, 0));
}

#[test]
fn test_clear_layers_report_sky_clear() {
    let mut payload = forecast_payload();
    payload["lclouds-surface"] = json!([0.0, 0.0, 0.0]);
    payload["mclouds-surface"] = json!([0.0, 0.0, 0.0]);

    let snapshot = normalize(&payload, test_now()).unwrap();
    assert_eq!(snapshot.cloud_layers, Some(vec![CloudLayer::sky_clear()]));
    assert_eq!(snapshot.sky_octas, Some(0));
    assert!(snapshot.is_sky_clear());
}

#[test]
fn test_light_precipitation_is_not_rain() {
    let mut payload = forecast_payload();
    payload["past3hprecip-surface"] = json!([0.0, 0.00002, 0.0]);

    let snapshot = normalize(&payload, test_now()).unwrap();
    assert_eq!(snapshot.phenomenon, Some(Phenomenon::None));
}

#[test]
fn test_missing_time_index_is_parse_error() {
    let result = normalize(&json!({ "temp-surface": [288.0] }), test_now());
    assert!(matches!(
        result,
        Err(AtisError::ProviderParse { ref provider, .. }) if provider == "forecast"
    ));
}

#[test]
fn test_time_index_without_usable_steps_is_parse_error() {
    let result = normalize(&json!({ "ts": [null, "soon"] }), test_now());
    assert!(result.is_err());
}
