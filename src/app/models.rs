//! Data models for ATIS synthesis
//!
//! This module contains the canonical weather snapshot that every provider
//! normalizes into, the value types it is built from, and the rotation
//! state that selects the broadcast identifier.

pub mod report;

use crate::constants::{INVALID, PHONETIC_ALPHABET, UNKNOWN};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use report::{AtisReport, SourceRecord, SourceRecords};

// =============================================================================
// Observation Time
// =============================================================================

/// UTC wall-clock time of an observation, or the sentinel for a timestamp
/// that could not be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ObservationTime {
    /// Valid UTC hour and minute
    Utc { hour: u8, minute: u8 },
    /// Conversion failed; the pipeline continues with this marker
    Invalid,
}

impl ObservationTime {
    /// Create a UTC observation time, rejecting out-of-range components
    pub fn utc(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self::Utc { hour, minute })
    }

    /// Whether this is the invalid sentinel
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// `HH:MM` followed by the Zulu marker
    pub fn with_marker(&self) -> String {
        match self {
            Self::Utc { .. } => format!("{}Z", self),
            Self::Invalid => INVALID.to_string(),
        }
    }

    /// `HHMMZ` as used in the compact report
    pub fn compact(&self) -> String {
        match self {
            Self::Utc { hour, minute } => format!("{:02}{:02}Z", hour, minute),
            Self::Invalid => INVALID.to_uppercase(),
        }
    }
}

impl fmt::Display for ObservationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc { hour, minute } => write!(f, "{:02}:{:02}", hour, minute),
            Self::Invalid => f.write_str(INVALID),
        }
    }
}

impl From<ObservationTime> for String {
    fn from(time: ObservationTime) -> Self {
        time.to_string()
    }
}

impl TryFrom<String> for ObservationTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == INVALID {
            return Ok(Self::Invalid);
        }
        let (hour, minute) = value
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got '{}'", value))?;
        let hour = hour.parse::<u8>().map_err(|e| e.to_string())?;
        let minute = minute.parse::<u8>().map_err(|e| e.to_string())?;
        Self::utc(hour, minute).ok_or_else(|| format!("time out of range: '{}'", value))
    }
}

// =============================================================================
// Wind
// =============================================================================

/// Pair of bearings between which the wind direction varies, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindVariability {
    pub from: u16,
    pub to: u16,
}

impl WindVariability {
    /// Both bearings zero-padded to three digits
    pub fn padded(&self) -> (String, String) {
        (format!("{:03}", self.from), format!("{:03}", self.to))
    }
}

impl fmt::Display for WindVariability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}V{:03}", self.from, self.to)
    }
}

// =============================================================================
// Sky Condition
// =============================================================================

/// Sky cover category of a single cloud layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkyCover {
    SkyClear,
    Few,
    Scattered,
    Broken,
    Overcast,
}

impl SkyCover {
    /// Category for an octas value; intermediate values fall to the lower band
    pub fn from_octas(octas: u8) -> Self {
        match octas {
            8.. => SkyCover::Overcast,
            7 => SkyCover::Broken,
            4..=6 => SkyCover::Scattered,
            1..=3 => SkyCover::Few,
            0 => SkyCover::SkyClear,
        }
    }

    /// Representative octas value of the category
    pub fn octas(&self) -> u8 {
        match self {
            SkyCover::Overcast => 8,
            SkyCover::Broken => 7,
            SkyCover::Scattered => 4,
            SkyCover::Few => 2,
            SkyCover::SkyClear => 0,
        }
    }

    /// Long descriptor used in the spoken report
    pub fn code(&self) -> &'static str {
        match self {
            SkyCover::Overcast => "OVERCAST",
            SkyCover::Broken => "BROKEN",
            SkyCover::Scattered => "SCATTERED",
            SkyCover::Few => "FEW",
            SkyCover::SkyClear => "SKY CLEAR",
        }
    }

    /// Three-letter descriptor used in the compact report
    pub fn short_code(&self) -> &'static str {
        match self {
            SkyCover::Overcast => "OVC",
            SkyCover::Broken => "BKN",
            SkyCover::Scattered => "SCT",
            SkyCover::Few => "FEW",
            SkyCover::SkyClear => "SKC",
        }
    }
}

/// One cloud layer with its estimated base altitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudLayer {
    pub cover: SkyCover,

    /// Estimated altitude in feet, unknown when no pressure was available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude_ft: Option<u32>,
}

impl CloudLayer {
    /// The single layer reported when no cloud was found
    pub fn sky_clear() -> Self {
        Self {
            cover: SkyCover::SkyClear,
            altitude_ft: None,
        }
    }

    /// Long description, e.g. `BROKEN 5800 FEET`
    pub fn describe(&self) -> String {
        match (self.cover, self.altitude_ft) {
            (SkyCover::SkyClear, _) | (_, None) => self.cover.code().to_string(),
            (cover, Some(altitude)) => format!("{} {} FEET", cover.code(), altitude),
        }
    }

    /// Short description in hundreds of feet, e.g. `BKN058`
    pub fn describe_short(&self) -> String {
        match (self.cover, self.altitude_ft) {
            (SkyCover::SkyClear, _) => self.cover.short_code().to_string(),
            (cover, None) => format!("{}///", cover.short_code()),
            (cover, Some(altitude)) => format!("{}{:03}", cover.short_code(), altitude / 100),
        }
    }
}

// =============================================================================
// Weather Phenomena
// =============================================================================

/// Significant present weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phenomenon {
    /// Nothing significant to report
    None,
    LightRain,
    Rain,
    Showers,
    LightSnow,
    Snow,
    Thunderstorm,
    Fog,
    Mist,
    Haze,
}

impl Phenomenon {
    /// Whether the phenomenon is worth a clause in the report
    pub fn is_significant(&self) -> bool {
        !matches!(self, Phenomenon::None)
    }

    /// Full words for the spoken report
    pub fn spoken(&self) -> &'static str {
        match self {
            Phenomenon::None => "no significant weather",
            Phenomenon::LightRain => "light rain",
            Phenomenon::Rain => "rain",
            Phenomenon::Showers => "rain showers",
            Phenomenon::LightSnow => "light snow",
            Phenomenon::Snow => "snow",
            Phenomenon::Thunderstorm => "thunderstorm",
            Phenomenon::Fog => "fog",
            Phenomenon::Mist => "mist",
            Phenomenon::Haze => "haze",
        }
    }

    /// Report code for the compact form
    pub fn code(&self) -> &'static str {
        match self {
            Phenomenon::None => "NSW",
            Phenomenon::LightRain => "-RA",
            Phenomenon::Rain => "RA",
            Phenomenon::Showers => "SHRA",
            Phenomenon::LightSnow => "-SN",
            Phenomenon::Snow => "SN",
            Phenomenon::Thunderstorm => "TS",
            Phenomenon::Fog => "FG",
            Phenomenon::Mist => "BR",
            Phenomenon::Haze => "HZ",
        }
    }
}

// =============================================================================
// Canonical Snapshot
// =============================================================================

/// The fused weather record.
///
/// Every field is optional; `None` is "unknown". Provider normalizers return
/// partial snapshots of this same type, and `CanonicalSnapshot::default()` is
/// the all-absent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSnapshot {
    /// Bearing the wind blows from, 1-360 degrees
    pub wind_direction: Option<u16>,

    /// Mean wind speed in knots
    pub wind_speed: Option<u32>,

    pub gust_direction: Option<u16>,

    /// Gust speed in knots
    pub gust_speed: Option<u32>,

    /// Derived during fusion, never supplied by a provider
    pub wind_variability: Option<WindVariability>,

    /// Visibility in kilometres
    pub visibility: Option<f64>,

    /// Air temperature in degrees Celsius
    pub temperature: Option<f64>,

    /// Dew point in degrees Celsius
    pub dew_point: Option<f64>,

    /// Sea-level pressure in hectopascals
    pub qnh: Option<f64>,

    /// Precipitation in millimetres
    pub precipitation: Option<f64>,

    pub observation_time: Option<ObservationTime>,

    /// Overall sky cover in octas (0-8)
    pub sky_octas: Option<u8>,

    /// Cloud layers ordered from lowest to highest
    pub cloud_layers: Option<Vec<CloudLayer>>,

    pub phenomenon: Option<Phenomenon>,
}

impl CanonicalSnapshot {
    /// Whether no field is known
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the sky is known to be clear
    pub fn is_sky_clear(&self) -> bool {
        match (&self.cloud_layers, self.sky_octas) {
            (Some(layers), _) => layers.iter().all(|l| l.cover == SkyCover::SkyClear),
            (None, Some(octas)) => octas == 0,
            (None, None) => false,
        }
    }

    /// Long layer descriptions, e.g. `["FEW 1700 FEET", "BROKEN 5800 FEET"]`
    pub fn cloud_layers_long(&self) -> Vec<String> {
        self.layers_or_octas()
            .iter()
            .map(CloudLayer::describe)
            .collect()
    }

    /// Short layer descriptions, e.g. `["FEW017", "BKN058"]`
    pub fn cloud_layers_short(&self) -> Vec<String> {
        self.layers_or_octas()
            .iter()
            .map(CloudLayer::describe_short)
            .collect()
    }

    /// Observation time as text, `unknown` when absent
    pub fn observation_time_text(&self) -> String {
        self.observation_time
            .map(|t| t.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Explicit layers, or a single altitude-less layer derived from octas
    fn layers_or_octas(&self) -> Vec<CloudLayer> {
        match (&self.cloud_layers, self.sky_octas) {
            (Some(layers), _) => layers.clone(),
            (None, Some(octas)) => vec![CloudLayer {
                cover: SkyCover::from_octas(octas),
                altitude_ft: None,
            }],
            (None, None) => Vec::new(),
        }
    }
}

// =============================================================================
// Broadcast Rotation
// =============================================================================

/// Position in the 26-letter broadcast identifier sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastIdentifier(u8);

impl BroadcastIdentifier {
    /// Identifier at `index`, wrapping modulo 26
    pub fn new(index: u8) -> Self {
        Self(index % 26)
    }

    /// Single letter, e.g. `A`
    pub fn letter(&self) -> char {
        char::from(b'A' + self.0)
    }

    /// Spelling-alphabet word, e.g. `Alpha`
    pub fn word(&self) -> &'static str {
        PHONETIC_ALPHABET[usize::from(self.0)]
    }
}

impl fmt::Display for BroadcastIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Rotation state carried between report generations by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    /// Index of the identifier last broadcast (0-25)
    pub current_index: u8,

    /// Observation time the last advance happened for
    pub last_observation_time: Option<String>,
}

impl Default for RotationState {
    /// Positioned on Zulu so the first report advances to Alpha
    fn default() -> Self {
        Self {
            current_index: 25,
            last_observation_time: None,
        }
    }
}

impl RotationState {
    /// Identifier currently on air
    pub fn identifier(&self) -> BroadcastIdentifier {
        BroadcastIdentifier::new(self.current_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_time_formats() {
        let time = ObservationTime::utc(9, 5).unwrap();
        assert_eq!(time.to_string(), "09:05");
        assert_eq!(time.with_marker(), "09:05Z");
        assert_eq!(time.compact(), "0905Z");
        assert_eq!(ObservationTime::Invalid.to_string(), "invalid");
        assert!(ObservationTime::utc(24, 0).is_none());
    }

    #[test]
    fn test_observation_time_serde_as_text() {
        let time = ObservationTime::utc(14, 30).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"14:30\"");
        let back: ObservationTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);

        let invalid: ObservationTime = serde_json::from_str("\"invalid\"").unwrap();
        assert!(invalid.is_invalid());
    }

    #[test]
    fn test_sky_cover_codes() {
        assert_eq!(SkyCover::from_octas(8).code(), "OVERCAST");
        assert_eq!(SkyCover::from_octas(7).short_code(), "BKN");
        assert_eq!(SkyCover::from_octas(5), SkyCover::Scattered);
        assert_eq!(SkyCover::from_octas(2).code(), "FEW");
        assert_eq!(SkyCover::from_octas(0).short_code(), "SKC");
    }

    #[test]
    fn test_cloud_layer_descriptions() {
        let layer = CloudLayer {
            cover: SkyCover::Broken,
            altitude_ft: Some(5800),
        };
        assert_eq!(layer.describe(), "BROKEN 5800 FEET");
        assert_eq!(layer.describe_short(), "BKN058");

        let unknown_base = CloudLayer {
            cover: SkyCover::Few,
            altitude_ft: None,
        };
        assert_eq!(unknown_base.describe(), "FEW");
        assert_eq!(unknown_base.describe_short(), "FEW///");

        assert_eq!(CloudLayer::sky_clear().describe_short(), "SKC");
    }

    #[test]
    fn test_snapshot_sky_clear_from_octas_only() {
        let snapshot = CanonicalSnapshot {
            sky_octas: Some(0),
            ..Default::default()
        };
        assert!(snapshot.is_sky_clear());
        assert_eq!(snapshot.cloud_layers_short(), vec!["SKC".to_string()]);

        assert!(!CanonicalSnapshot::default().is_sky_clear());
        assert!(CanonicalSnapshot::default().is_empty());
    }

    #[test]
    fn test_broadcast_identifier_letters() {
        assert_eq!(BroadcastIdentifier::new(0).letter(), 'A');
        assert_eq!(BroadcastIdentifier::new(0).word(), "Alpha");
        assert_eq!(BroadcastIdentifier::new(25).letter(), 'Z');
        assert_eq!(BroadcastIdentifier::new(26).word(), "Alpha");
    }

    #[test]
    fn test_default_rotation_state_sits_on_zulu() {
        let state = RotationState::default();
        assert_eq!(state.identifier().word(), "Zulu");
        assert!(state.last_observation_time.is_none());
    }
}
