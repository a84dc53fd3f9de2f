//! End-to-end report generation against canned provider responses

use atis_fusion::app::adapters::http::{HttpClient, HttpError};
use atis_fusion::app::models::SourceRecord;
use atis_fusion::{AtisConfig, ReportGenerator, RotationState, RotationStore, Secrets};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use std::collections::HashMap;
use tempfile::TempDir;

const FORECAST_URL: &str = "https://forecast.test/point";
const AGENCY_BASE: &str = "https://agency.test/api";
const STATION_URL: &str = "http://station.test/weather";

/// Serves fixed bodies by URL; anything else is a 404
struct FixtureClient {
    bodies: HashMap<String, String>,
}

impl FixtureClient {
    fn new(bodies: &[(String, String)]) -> Self {
        Self {
            bodies: bodies.iter().cloned().collect(),
        }
    }

    fn answer(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        self.bodies
            .get(url)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| HttpError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

impl HttpClient for FixtureClient {
    async fn get(&self, url: &str, _headers: &[(&str, &str)]) -> Result<Vec<u8>, HttpError> {
        self.answer(url)
    }

    async fn post_json(&self, url: &str, _json_body: &str) -> Result<Vec<u8>, HttpError> {
        self.answer(url)
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap()
}

fn config() -> AtisConfig {
    let mut config = AtisConfig::default().with_station_page(STATION_URL);
    config.providers.forecast_url = FORECAST_URL.to_string();
    config.providers.agency_base_url = AGENCY_BASE.to_string();
    config.providers.agency_secondary_station = None;
    config
}

fn secrets() -> Secrets {
    Secrets {
        forecast_api_key: "forecast-key".to_string(),
        agency_api_key: "agency-key".to_string(),
    }
}

/// Envelope pointing at the data document, plus the document itself
fn agency_document(path: &str, data: serde_json::Value) -> Vec<(String, String)> {
    let data_url = format!("https://agency.test/data{}", path);
    vec![
        (
            format!("{}{}", AGENCY_BASE, path),
            json!({ "descripcion": "exito", "estado": 200, "datos": data_url }).to_string(),
        ),
        (data_url, data.to_string()),
    ]
}

fn all_providers(station_time: &str) -> FixtureClient {
    let mut bodies = vec![
        (
            FORECAST_URL.to_string(),
            json!({
                "ts": [now().timestamp_millis()],
                "wind_u-surface": [-5.0],
                "wind_v-surface": [0.0],
                "temp-surface": [290.15],
                "pressure-surface": [101500.0]
            })
            .to_string(),
        ),
        (
            STATION_URL.to_string(),
            format!(
                "<html><body><table>\
                 <tr><td>Updated:</td><td>16/10/2026 {}</td></tr>\
                 <tr><td>Temperature:</td><td>16.0 &deg;C</td></tr>\
                 <tr><td>Wind:</td><td>20 km/h W</td></tr>\
                 </table></body></html>",
                station_time
            ),
        ),
    ];
    bodies.extend(agency_document(
        "/observacion/convencional/datos/estacion/3196",
        json!([{
            "idema": "3196",
            "fint": "2026-10-16T10:00:00+0000",
            "ta": 15.2,
            "tpr": 6.0,
            "pres_nmar": 1018.4,
            "vv": 5.1,
            "dv": 250.0,
            "vis": 8.0,
            "prec": 0.0
        }]),
    ));
    bodies.extend(agency_document(
        "/prediccion/especifica/municipio/horaria/28079",
        json!([{
            "prediccion": {
                "dia": [{
                    "fecha": "2026-10-16T00:00:00",
                    "estadoCielo": [
                        { "value": "12", "periodo": "12", "descripcion": "Poco nuboso" }
                    ]
                }]
            }
        }]),
    ));
    FixtureClient::new(&bodies)
}

#[tokio::test]
async fn test_report_fuses_all_three_providers() {
    let generator = ReportGenerator::new(all_providers("12:20"), config(), Some(secrets()));

    let (report, state) = generator
        .generate(&RotationState::default(), now())
        .await
        .unwrap();

    assert!(!report.failed);
    assert_eq!(report.sources.fetched_count(), 3);
    assert_eq!(state.last_observation_time.as_deref(), Some("10:20"));

    // Station temperature and wind, agency dew point and pressure
    assert!(report.spoken.starts_with("This is Cuatro Vientos information Alpha."));
    assert!(report.spoken.contains("Temperature 16 degrees."));
    assert!(report.spoken.contains("Dew point 6 degrees."));
    assert!(report.spoken.contains("QNH 1018 hectopascals."));
    assert!(report.spoken.contains("Visibility 8 kilometres."));
    assert!(report.spoken.contains("Wind variable between 250 and 270 degrees."));

    assert!(report.compact.starts_with("LEVS ATIS A\nTIME 1020Z\nRWY 28\n"));
    assert!(report.compact.contains("\nVRB 250V270\n"));
    assert!(report.compact.ends_with("ACKNOWLEDGE INFORMATION ALPHA ON INITIAL CONTACT"));
}

#[tokio::test]
async fn test_unreachable_agency_degrades_gracefully() {
    let client = FixtureClient::new(&[(
        STATION_URL.to_string(),
        "Updated: 16/10/2026 12:20\nTemperature: -2.4 C\nWind: calm".to_string(),
    )]);
    let generator = ReportGenerator::new(client, config(), Some(secrets()));

    let (report, _) = generator
        .generate(&RotationState::default(), now())
        .await
        .unwrap();

    assert!(!report.failed);
    assert!(matches!(report.sources.agency, SourceRecord::FetchFailed { .. }));
    assert!(matches!(report.sources.forecast, SourceRecord::FetchFailed { .. }));
    assert!(report.sources.station.is_fetched());
    assert!(report.spoken.contains("Wind calm."));
    assert!(report.spoken.contains("Temperature minus 2 degrees."));
    assert!(report.compact.contains("\nWIND CALM\n"));
    assert!(report.compact.contains("\nTEMP M2\n"));
}

#[tokio::test]
async fn test_rotation_persists_between_runs() {
    let dir = TempDir::new().unwrap();
    let store = RotationStore::new(dir.path().join("state").join("rotation.json"));

    let generator = ReportGenerator::new(all_providers("12:20"), config(), Some(secrets()));
    let (first, state) = generator.generate(&store.load().unwrap(), now()).await.unwrap();
    store.save(&state).unwrap();

    // Same observation time after a restart keeps the identifier
    let (again, state) = generator.generate(&store.load().unwrap(), now()).await.unwrap();
    store.save(&state).unwrap();
    assert_eq!(first.identifier, again.identifier);

    let generator = ReportGenerator::new(all_providers("12:50"), config(), Some(secrets()));
    let (next, state) = generator.generate(&store.load().unwrap(), now()).await.unwrap();
    store.save(&state).unwrap();

    assert_eq!(next.identifier.map(|i| i.word()), Some("Bravo"));
    assert_eq!(store.load().unwrap().last_observation_time.as_deref(), Some("10:50"));

    store.reset().unwrap();
    assert_eq!(store.load().unwrap(), RotationState::default());
}

#[tokio::test]
async fn test_report_serializes_with_diagnostics() {
    let generator = ReportGenerator::new(all_providers("12:20"), config(), Some(secrets()));
    let (report, _) = generator
        .generate(&RotationState::default(), now())
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["failed"], false);
    assert_eq!(json["sources"]["station"]["status"], "fetched");
    assert_eq!(json["sources"]["agency"]["status"], "fetched");
}
