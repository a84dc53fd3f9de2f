//! Report generation pipeline
//!
//! Queries the three providers concurrently, normalizes each payload, fuses
//! the partial snapshots, advances the broadcast rotation and renders both
//! report forms.
//!
//! A provider that fails contributes an all-absent snapshot and a record of
//! the failure; generation continues with the others. Only configuration
//! problems are returned as errors. Anything that goes wrong after the
//! fetches is turned into a failed report and leaves the rotation state
//! untouched.

use crate::app::adapters::http::HttpClient;
use crate::app::models::{
    AtisReport, CanonicalSnapshot, RotationState, SourceRecord, SourceRecords,
};
use crate::app::services::fusion::{ProviderSnapshots, fuse};
use crate::app::services::providers::{fetch_agency, fetch_forecast, fetch_station};
use crate::app::services::report_renderer::{RenderInput, render};
use crate::app::services::rotation::advance_for;
use crate::app::services::source_normalizer::{Provider, agency, forecast, station};
use crate::config::{AtisConfig, Secrets};
use crate::constants::{AGENCY_API_KEY_ENV, FORECAST_API_KEY_ENV};
use crate::error::{AtisError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, error, info, warn};

/// Raw record and partial snapshot of one provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderOutcome {
    pub record: SourceRecord,
    pub snapshot: CanonicalSnapshot,
}

impl ProviderOutcome {
    fn not_configured() -> Self {
        Self {
            record: SourceRecord::NotConfigured,
            snapshot: CanonicalSnapshot::default(),
        }
    }

    /// Record a failure; the provider contributes nothing
    fn failed(provider: Provider, error: &AtisError) -> Self {
        if error.is_recoverable() {
            warn!("{} provider degraded: {}", provider, error);
        } else {
            error!("{} provider failed unexpectedly: {}", provider, error);
        }
        let record = match error {
            AtisError::ProviderFetch { .. } => SourceRecord::fetch_failed(error.to_string()),
            _ => SourceRecord::parse_failed(error.to_string()),
        };
        Self {
            record,
            snapshot: CanonicalSnapshot::default(),
        }
    }

    /// Normalize a fetched payload, keeping the payload for diagnostics
    fn from_fetch<T, F>(provider: Provider, fetched: Result<T>, normalize: F) -> Self
    where
        T: Serialize,
        F: FnOnce(&T) -> Result<CanonicalSnapshot>,
    {
        let outcome = fetched.and_then(|payload| {
            let snapshot = normalize(&payload)?;
            let payload = serde_json::to_value(&payload)?;
            Ok((payload, snapshot))
        });

        match outcome {
            Ok((payload, snapshot)) => {
                debug!("{} provider contributed", provider);
                Self {
                    record: SourceRecord::Fetched { payload },
                    snapshot,
                }
            }
            Err(e) => Self::failed(provider, &e),
        }
    }
}

/// Generates ATIS reports for the configured aerodrome
pub struct ReportGenerator<C: HttpClient> {
    client: C,
    config: AtisConfig,
    secrets: Option<Secrets>,
}

impl<C: HttpClient> ReportGenerator<C> {
    pub fn new(client: C, config: AtisConfig, secrets: Option<Secrets>) -> Self {
        Self {
            client,
            config,
            secrets,
        }
    }

    pub fn config(&self) -> &AtisConfig {
        &self.config
    }

    /// Generate one report.
    ///
    /// Returns the report together with the rotation state to carry into the
    /// next call. Fails only when the configuration or secrets are missing or
    /// invalid, before any provider is contacted.
    pub async fn generate(
        &self,
        state: &RotationState,
        now: DateTime<Utc>,
    ) -> Result<(AtisReport, RotationState)> {
        self.generate_with(state, now, |snapshots, sources| {
            self.synthesize(state, snapshots, sources, now)
        })
        .await
    }

    /// Fetch and normalize, then hand the partial snapshots to `synthesize`.
    ///
    /// A panic inside `synthesize` becomes a failed report carrying the
    /// caller's state unchanged.
    async fn generate_with<S>(
        &self,
        state: &RotationState,
        now: DateTime<Utc>,
        synthesize: S,
    ) -> Result<(AtisReport, RotationState)>
    where
        S: FnOnce(&ProviderSnapshots, SourceRecords) -> (AtisReport, RotationState),
    {
        self.config.validate()?;
        let secrets = self.secrets.as_ref().ok_or_else(|| {
            AtisError::configuration(format!(
                "Missing required secrets {} and {}",
                FORECAST_API_KEY_ENV, AGENCY_API_KEY_ENV
            ))
        })?;

        let (forecast, agency, station) = futures::join!(
            self.forecast_outcome(&secrets.forecast_api_key, now),
            self.agency_outcome(&secrets.agency_api_key, now),
            self.station_outcome(),
        );

        let sources = SourceRecords {
            forecast: forecast.record,
            agency: agency.record,
            station: station.record,
        };
        let snapshots = ProviderSnapshots {
            forecast: forecast.snapshot,
            agency: agency.snapshot,
            station: station.snapshot,
        };

        let synthesized =
            catch_unwind(AssertUnwindSafe(|| synthesize(&snapshots, sources.clone())));

        match synthesized {
            Ok(result) => Ok(result),
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Report synthesis failed: {}", message);
                Ok((AtisReport::failure(&message, sources, now), state.clone()))
            }
        }
    }

    /// Fuse, rotate and render
    fn synthesize(
        &self,
        state: &RotationState,
        snapshots: &ProviderSnapshots,
        sources: SourceRecords,
        now: DateTime<Utc>,
    ) -> (AtisReport, RotationState) {
        let snapshot = fuse(snapshots);
        let (next_state, identifier) = advance_for(state, &snapshot);

        let rendered = render(&RenderInput::new(&snapshot, identifier, &self.config));

        info!(
            "Generated information {} from {} of 3 providers",
            identifier,
            sources.fetched_count()
        );

        let report = AtisReport {
            identifier: Some(identifier),
            spoken: rendered.spoken,
            compact: rendered.compact,
            snapshot: Some(snapshot),
            sources,
            generated_at: now,
            failed: false,
        };
        (report, next_state)
    }

    async fn forecast_outcome(&self, api_key: &str, now: DateTime<Utc>) -> ProviderOutcome {
        let fetched = fetch_forecast(&self.client, &self.config, api_key).await;
        ProviderOutcome::from_fetch(Provider::Forecast, fetched, |payload| {
            forecast::normalize(payload, now)
        })
    }

    async fn agency_outcome(&self, api_key: &str, now: DateTime<Utc>) -> ProviderOutcome {
        let zone = self.config.aerodrome.time_zone.as_str();
        let fetched = fetch_agency(&self.client, &self.config, api_key).await;
        ProviderOutcome::from_fetch(Provider::Agency, fetched, |payload| {
            agency::normalize(payload, now, zone)
        })
    }

    async fn station_outcome(&self) -> ProviderOutcome {
        let Some(url) = self.config.providers.station_page_url.as_deref() else {
            debug!("No station page configured");
            return ProviderOutcome::not_configured();
        };

        let zone = self.config.aerodrome.time_zone.as_str();
        let fetched = fetch_station(&self.client, url).await;
        ProviderOutcome::from_fetch(Provider::Station, fetched, |record| {
            Ok(station::normalize(record, zone))
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected internal error".to_string()
    }
}
