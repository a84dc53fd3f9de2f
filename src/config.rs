//! Configuration management and validation.
//!
//! Provides the aerodrome description, provider endpoints and rendering
//! thresholds, plus the two provider API keys loaded from the environment.

use crate::constants::{
    AGENCY_API_KEY_ENV, DEFAULT_AERODROME_NAME, DEFAULT_AGENCY_BASE_URL,
    DEFAULT_AGENCY_MUNICIPALITY, DEFAULT_AGENCY_PRIMARY_STATION, DEFAULT_AGENCY_SECONDARY_STATION,
    DEFAULT_CAVOK_VISIBILITY_KM, DEFAULT_FORECAST_MODEL, DEFAULT_FORECAST_URL, DEFAULT_ICAO,
    DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_RUNWAY_HEADINGS, DEFAULT_TIME_ZONE,
    FORECAST_API_KEY_ENV,
};
use crate::error::{AtisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// The single aerodrome reports are produced for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AerodromeConfig {
    /// ICAO location indicator
    pub icao: String,

    /// Name used in the spoken report
    pub name: String,

    /// Latitude in WGS84 decimal degrees
    pub latitude: f64,

    /// Longitude in WGS84 decimal degrees
    pub longitude: f64,

    /// Civil time zone of the local station (tz database name)
    pub time_zone: String,

    /// Magnetic headings of the two runway directions, 180 degrees apart
    pub runway_headings: [u16; 2],
}

/// Where each provider is queried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    /// Point-forecast endpoint of the forecast model
    pub forecast_url: String,

    /// Model name requested from the forecast provider
    pub forecast_model: String,

    /// Base URL of the national agency's open data API
    pub agency_base_url: String,

    /// Primary observation station of the agency
    pub agency_primary_station: String,

    /// Secondary observation station, filling gaps of the primary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_secondary_station: Option<String>,

    /// Municipality code for the hourly prediction
    pub agency_municipality: String,

    /// Page of the aerodrome's own weather station
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_page_url: Option<String>,
}

/// Thresholds used while rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Visibility (km) above which a clear sky is reported as CAVOK
    pub cavok_visibility_km: f64,

    /// Wind speed (kt) at or below which the wind is reported calm
    pub calm_wind_kt: u32,
}

/// Global configuration for ATIS generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtisConfig {
    pub aerodrome: AerodromeConfig,
    pub providers: ProviderEndpoints,
    pub rendering: RenderingConfig,
}

impl Default for AerodromeConfig {
    fn default() -> Self {
        Self {
            icao: DEFAULT_ICAO.to_string(),
            name: DEFAULT_AERODROME_NAME.to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            runway_headings: DEFAULT_RUNWAY_HEADINGS,
        }
    }
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            forecast_model: DEFAULT_FORECAST_MODEL.to_string(),
            agency_base_url: DEFAULT_AGENCY_BASE_URL.to_string(),
            agency_primary_station: DEFAULT_AGENCY_PRIMARY_STATION.to_string(),
            agency_secondary_station: Some(DEFAULT_AGENCY_SECONDARY_STATION.to_string()),
            agency_municipality: DEFAULT_AGENCY_MUNICIPALITY.to_string(),
            station_page_url: None,
        }
    }
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            cavok_visibility_km: DEFAULT_CAVOK_VISIBILITY_KM,
            calm_wind_kt: 0,
        }
    }
}

impl Default for AtisConfig {
    fn default() -> Self {
        Self {
            aerodrome: AerodromeConfig::default(),
            providers: ProviderEndpoints::default(),
            rendering: RenderingConfig::default(),
        }
    }
}

impl AtisConfig {
    /// Load configuration from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check ranges and cross-field consistency
    pub fn validate(&self) -> Result<()> {
        let aerodrome = &self.aerodrome;

        if !(-90.0..=90.0).contains(&aerodrome.latitude) {
            return Err(AtisError::configuration(format!(
                "Invalid latitude {}: must be between -90 and 90 degrees",
                aerodrome.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&aerodrome.longitude) {
            return Err(AtisError::configuration(format!(
                "Invalid longitude {}: must be between -180 and 180 degrees",
                aerodrome.longitude
            )));
        }

        let [first, second] = aerodrome.runway_headings;
        if !(1..=360).contains(&first) || !(1..=360).contains(&second) {
            return Err(AtisError::configuration(format!(
                "Runway headings {:?} must be between 1 and 360",
                aerodrome.runway_headings
            )));
        }
        if (i32::from(first) - i32::from(second)).abs() != 180 {
            return Err(AtisError::configuration(format!(
                "Runway headings {:?} must be 180 degrees apart",
                aerodrome.runway_headings
            )));
        }

        if jiff::tz::TimeZone::get(&aerodrome.time_zone).is_err() {
            return Err(AtisError::configuration(format!(
                "Unknown time zone '{}'",
                aerodrome.time_zone
            )));
        }

        if self.rendering.cavok_visibility_km < 0.0 {
            return Err(AtisError::configuration(
                "CAVOK visibility threshold must not be negative",
            ));
        }

        Ok(())
    }

    /// Scrape the local station from `url`
    pub fn with_station_page(mut self, url: impl Into<String>) -> Self {
        self.providers.station_page_url = Some(url.into());
        self
    }

    /// Set the runway headings
    pub fn with_runway_headings(mut self, headings: [u16; 2]) -> Self {
        self.aerodrome.runway_headings = headings;
        self
    }
}

// =============================================================================
// Secrets
// =============================================================================

/// API keys of the two authenticated providers
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pub forecast_api_key: String,
    pub agency_api_key: String,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("forecast_api_key", &"<redacted>")
            .field("agency_api_key", &"<redacted>")
            .finish()
    }
}

impl Secrets {
    /// Read both keys from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both keys through `lookup`; a missing or blank key is a
    /// configuration error
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    AtisError::configuration(format!("Missing required secret {}", name))
                })
        };

        Ok(Self {
            forecast_api_key: read(FORECAST_API_KEY_ENV)?,
            agency_api_key: read(AGENCY_API_KEY_ENV)?,
        })
    }
}
