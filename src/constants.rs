//! Application constants for ATIS synthesis
//!
//! This module contains conversion factors, meteorological thresholds,
//! broadcast alphabet tables, provider parameter names and the default
//! aerodrome settings used throughout the crate.

// =============================================================================
// Unit Conversion Factors
// =============================================================================

/// Knots per kilometre-per-hour
pub const KMH_TO_KNOTS: f64 = 0.539957;

/// Knots per metre-per-second
pub const MPS_TO_KNOTS: f64 = 1.94384;

/// Hectopascals per pascal
pub const PA_TO_HPA: f64 = 0.01;

/// Offset between Kelvin and Celsius
pub const KELVIN_OFFSET: f64 = 273.15;

// =============================================================================
// Cloud Estimation
// =============================================================================

/// Cloud cover percentage thresholds mapped to representative octas
pub mod cloud_cover {
    /// Percentage at or above which the layer is overcast (8 octas)
    pub const OVERCAST_PCT: f64 = 88.0;

    /// Percentage at or above which the layer is broken (7 octas)
    pub const BROKEN_PCT: f64 = 51.0;

    /// Percentage at or above which the layer is scattered (4 octas)
    pub const SCATTERED_PCT: f64 = 25.0;

    /// Percentage at or above which the layer is few (2 octas)
    pub const FEW_PCT: f64 = 1.0;
}

/// Reference pressure levels used to estimate layer altitudes
pub mod layer_pressure {
    /// Low cloud reference pressure (hPa)
    pub const LOW_HPA: f64 = 950.0;

    /// Mid cloud reference pressure (hPa)
    pub const MID_HPA: f64 = 800.0;

    /// High cloud reference pressure (hPa)
    pub const HIGH_HPA: f64 = 500.0;

    /// Linear height gain per hectopascal of pressure difference (feet)
    pub const FEET_PER_HPA: f64 = 27.0;

    /// Altitudes are reported to this granularity (feet)
    pub const ALTITUDE_STEP_FT: f64 = 100.0;
}

// =============================================================================
// Broadcast Identifiers
// =============================================================================

/// ICAO spelling alphabet used for the broadcast identifier, in rotation order
pub const PHONETIC_ALPHABET: [&str; 26] = [
    "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India", "Juliett",
    "Kilo", "Lima", "Mike", "November", "Oscar", "Papa", "Quebec", "Romeo", "Sierra", "Tango",
    "Uniform", "Victor", "Whiskey", "X-ray", "Yankee", "Zulu",
];

/// Placeholder used for fields that no provider could supply
pub const UNKNOWN: &str = "unknown";

/// Sentinel for timestamps that could not be converted
pub const INVALID: &str = "invalid";

// =============================================================================
// Compass Points
// =============================================================================

/// 16-point compass letters mapped to whole degrees.
///
/// North is reported as 360, the aviation convention for a wind from north.
pub const COMPASS_POINTS: &[(&str, u16)] = &[
    ("N", 360),
    ("NNE", 23),
    ("NE", 45),
    ("ENE", 68),
    ("E", 90),
    ("ESE", 113),
    ("SE", 135),
    ("SSE", 158),
    ("S", 180),
    ("SSW", 203),
    ("SW", 225),
    ("WSW", 248),
    ("W", 270),
    ("WNW", 293),
    ("NW", 315),
    ("NNW", 338),
];

// =============================================================================
// Provider Parameters
// =============================================================================

/// Parameter keys of the forecast-model point forecast
pub mod forecast_params {
    pub const TIMESTAMPS: &str = "ts";
    pub const UNITS: &str = "units";
    pub const WIND_U: &str = "wind_u-surface";
    pub const WIND_V: &str = "wind_v-surface";
    pub const GUST: &str = "gust-surface";
    pub const TEMPERATURE: &str = "temp-surface";
    pub const DEW_POINT: &str = "dewpoint-surface";
    pub const PRESSURE: &str = "pressure-surface";
    pub const PRECIPITATION: &str = "past3hprecip-surface";
    pub const LOW_CLOUDS: &str = "lclouds-surface";
    pub const MID_CLOUDS: &str = "mclouds-surface";
    pub const HIGH_CLOUDS: &str = "hclouds-surface";

    /// Parameters requested from the forecast model
    pub const REQUESTED: &[&str] = &[
        "wind", "windGust", "temp", "dewpoint", "pressure", "precip", "lclouds", "mclouds",
        "hclouds",
    ];
}

/// Accumulated precipitation (mm) from which the forecast reports rain
pub const FORECAST_RAIN_THRESHOLD_MM: f64 = 0.1;

/// Vertical level requested from the forecast model
pub const FORECAST_LEVEL: &str = "surface";

/// Request paths of the national agency's open data API
pub mod agency_paths {
    /// Conventional observations of one station, followed by the station id
    pub const OBSERVATION: &str = "/observacion/convencional/datos/estacion";

    /// Hourly municipal prediction, followed by the municipality code
    pub const PREDICTION: &str = "/prediccion/especifica/municipio/horaria";

    /// Header carrying the API key
    pub const KEY_HEADER: &str = "api_key";
}

// =============================================================================
// Default Aerodrome
// =============================================================================

pub const DEFAULT_ICAO: &str = "LEVS";
pub const DEFAULT_AERODROME_NAME: &str = "Cuatro Vientos";
pub const DEFAULT_LATITUDE: f64 = 40.3706;
pub const DEFAULT_LONGITUDE: f64 = -3.7851;
pub const DEFAULT_TIME_ZONE: &str = "Europe/Madrid";
pub const DEFAULT_RUNWAY_HEADINGS: [u16; 2] = [100, 280];

pub const DEFAULT_FORECAST_URL: &str = "https://api.windy.com/api/point-forecast/v2";
pub const DEFAULT_FORECAST_MODEL: &str = "gfs";
pub const DEFAULT_AGENCY_BASE_URL: &str = "https://opendata.aemet.es/opendata/api";
pub const DEFAULT_AGENCY_PRIMARY_STATION: &str = "3196";
pub const DEFAULT_AGENCY_SECONDARY_STATION: &str = "3195";
pub const DEFAULT_AGENCY_MUNICIPALITY: &str = "28079";

/// Visibility (km) above which a clear sky is reported as CAVOK
pub const DEFAULT_CAVOK_VISIBILITY_KM: f64 = 10.0;

/// Environment variable holding the forecast-model API key
pub const FORECAST_API_KEY_ENV: &str = "ATIS_FORECAST_API_KEY";

/// Environment variable holding the national agency API key
pub const AGENCY_API_KEY_ENV: &str = "ATIS_AGENCY_API_KEY";

/// Default file name for the persisted rotation state
pub const ROTATION_STATE_FILE: &str = "rotation.json";

/// Directory under the user data dir holding persisted state
pub const APP_DATA_DIR: &str = "atis-fusion";

/// User agent sent to every provider
pub const USER_AGENT: &str = concat!("atis-fusion/", env!("CARGO_PKG_VERSION"));
