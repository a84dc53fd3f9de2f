//! Provider retrieval
//!
//! Fetches the raw payload of each provider through an [`HttpClient`]. A
//! transport failure or non-success status is returned as
//! [`AtisError::ProviderFetch`]; a body that cannot be decoded at all as
//! [`AtisError::ProviderParse`]. Nothing is retried.

use crate::app::adapters::http::HttpClient;
use crate::app::adapters::scrape::clean_html;
use crate::app::services::source_normalizer::station::parse_record;
use crate::app::services::source_normalizer::{AgencyPayload, Provider, StationRecord};
use crate::config::AtisConfig;
use crate::constants::{FORECAST_LEVEL, agency_paths, forecast_params};
use crate::error::{AtisError, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

// =============================================================================
// Forecast Model
// =============================================================================

/// Request the point forecast for the aerodrome
pub async fn fetch_forecast<C: HttpClient>(
    client: &C,
    config: &AtisConfig,
    api_key: &str,
) -> Result<Value> {
    let request = json!({
        "lat": config.aerodrome.latitude,
        "lon": config.aerodrome.longitude,
        "model": config.providers.forecast_model,
        "parameters": forecast_params::REQUESTED,
        "levels": [FORECAST_LEVEL],
        "key": api_key,
    });

    debug!(
        "Requesting {} point forecast from {}",
        config.providers.forecast_model, config.providers.forecast_url
    );

    let body = client
        .post_json(&config.providers.forecast_url, &request.to_string())
        .await
        .map_err(|e| AtisError::provider_fetch(Provider::Forecast.name(), e.to_string()))?;

    decode_json(Provider::Forecast, &body)
}

// =============================================================================
// National Agency
// =============================================================================

/// First-step response of the agency API pointing at the actual document
#[derive(Debug, Deserialize)]
struct AgencyEnvelope {
    estado: Option<u16>,
    descripcion: Option<String>,
    datos: Option<String>,
}

/// Retrieve the agency's observation and prediction documents.
///
/// The three documents are requested concurrently. A document that fails is
/// logged and left out; only when all of them fail is the fetch an error.
pub async fn fetch_agency<C: HttpClient>(
    client: &C,
    config: &AtisConfig,
    api_key: &str,
) -> Result<AgencyPayload> {
    let providers = &config.providers;
    let base = providers.agency_base_url.trim_end_matches('/');

    let primary_url = format!(
        "{}{}/{}",
        base,
        agency_paths::OBSERVATION,
        providers.agency_primary_station
    );
    let secondary_url = providers
        .agency_secondary_station
        .as_ref()
        .map(|id| format!("{}{}/{}", base, agency_paths::OBSERVATION, id));
    let prediction_url = format!(
        "{}{}/{}",
        base,
        agency_paths::PREDICTION,
        providers.agency_municipality
    );

    let secondary = async {
        match &secondary_url {
            Some(url) => Some(fetch_agency_document(client, url, api_key).await),
            None => None,
        }
    };

    let (primary, secondary, prediction) = futures::join!(
        fetch_agency_document(client, &primary_url, api_key),
        secondary,
        fetch_agency_document(client, &prediction_url, api_key),
    );

    let mut first_error = None;
    let mut keep = |label: &str, result: Result<Value>| match result {
        Ok(document) => Some(document),
        Err(e) => {
            warn!("Agency {} document unavailable: {}", label, e);
            first_error.get_or_insert(e);
            None
        }
    };

    let payload = AgencyPayload {
        primary: keep("primary station", primary),
        secondary: secondary.and_then(|result| keep("secondary station", result)),
        prediction: keep("prediction", prediction),
    };

    if payload.primary.is_none() && payload.secondary.is_none() && payload.prediction.is_none() {
        return Err(first_error
            .unwrap_or_else(|| AtisError::provider_fetch(Provider::Agency.name(), "no documents")));
    }

    Ok(payload)
}

/// Two-step retrieval: the envelope names the URL of the document itself
async fn fetch_agency_document<C: HttpClient>(
    client: &C,
    url: &str,
    api_key: &str,
) -> Result<Value> {
    let headers = [(agency_paths::KEY_HEADER, api_key)];

    let body = client
        .get(url, &headers)
        .await
        .map_err(|e| AtisError::provider_fetch(Provider::Agency.name(), e.to_string()))?;
    let envelope: AgencyEnvelope = serde_json::from_value(decode_json(Provider::Agency, &body)?)
        .map_err(|e| AtisError::provider_parse(Provider::Agency.name(), e.to_string()))?;

    if let Some(status) = envelope.estado.filter(|s| *s != 200) {
        return Err(AtisError::provider_fetch(
            Provider::Agency.name(),
            format!(
                "status {} from {}: {}",
                status,
                url,
                envelope.descripcion.as_deref().unwrap_or("no description")
            ),
        ));
    }

    let data_url = envelope.datos.ok_or_else(|| {
        AtisError::provider_parse(Provider::Agency.name(), "response has no data URL")
    })?;

    debug!("Fetching agency document from {}", data_url);
    let body = client
        .get(&data_url, &headers)
        .await
        .map_err(|e| AtisError::provider_fetch(Provider::Agency.name(), e.to_string()))?;

    decode_json(Provider::Agency, &body)
}

// =============================================================================
// Local Station
// =============================================================================

/// Scrape the station page and read its labelled fields
pub async fn fetch_station<C: HttpClient>(client: &C, url: &str) -> Result<StationRecord> {
    debug!("Fetching station page {}", url);

    let body = client
        .get(url, &[])
        .await
        .map_err(|e| AtisError::provider_fetch(Provider::Station.name(), e.to_string()))?;

    let text = clean_html(&String::from_utf8_lossy(&body));
    parse_record(&text)
}

/// Decode a JSON body; the agency serves Latin-1 text, so bytes are read lossily
fn decode_json(provider: Provider, body: &[u8]) -> Result<Value> {
    serde_json::from_str(&String::from_utf8_lossy(body))
        .map_err(|e| AtisError::provider_parse(provider.name(), format!("invalid JSON: {}", e)))
}
