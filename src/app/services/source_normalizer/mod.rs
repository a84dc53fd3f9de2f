//! Provider payload normalization
//!
//! Each provider delivers a differently shaped payload. The normalizers in
//! this module turn them into partial [`CanonicalSnapshot`]s in which every
//! field the provider cannot supply is `None`.
//!
//! ## Architecture
//!
//! - [`forecast`] - gridded model point forecast (wind components, Kelvin, Pa, cloud %)
//! - [`agency`] - national agency station observations and municipal sky prediction
//! - [`station`] - labelled text block scraped from the aerodrome's own station
//! - [`nearest`] - selection of the time-series record closest to now
//!
//! A missing field is never an error. A payload that does not have the
//! expected structure is reported as [`AtisError::ProviderParse`] so the
//! caller can record it and continue with an all-absent snapshot.
//!
//! [`CanonicalSnapshot`]: crate::app::models::CanonicalSnapshot
//! [`AtisError::ProviderParse`]: crate::error::AtisError::ProviderParse

pub mod agency;
pub mod forecast;
pub mod nearest;
pub mod station;

#[cfg(test)]
pub mod tests;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use agency::AgencyPayload;
pub use station::StationRecord;

/// The three weather providers, listed in ascending precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Forecast,
    Agency,
    Station,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Forecast => "forecast",
            Provider::Agency => "agency",
            Provider::Station => "station",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
