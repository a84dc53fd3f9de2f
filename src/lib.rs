//! ATIS Fusion Library
//!
//! Builds Automatic Terminal Information Service broadcasts for a single
//! aerodrome by fusing three independent weather providers: a forecast
//! model, the national weather agency and the aerodrome's own station.
//!
//! This library provides tools for:
//! - Normalizing each provider's payload into a partial weather snapshot
//! - Precedence-based fusion of the partial snapshots
//! - Wind vector, variability and cloud altitude arithmetic
//! - Daylight-saving-aware civil time to UTC conversion
//! - Broadcast identifier rotation across observation times
//! - Rendering the spoken ATIS and the compact D-ATIS reports

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod clouds;
        pub mod fusion;
        pub mod providers;
        pub mod report_generator;
        pub mod report_renderer;
        pub mod rotation;
        pub mod source_normalizer;
        pub mod time_normalizer;
        pub mod units;
        pub mod wind;
    }
    pub mod adapters {
        pub mod http;
        pub mod scrape;
        pub mod state_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::adapters::http::{HttpClient, ReqwestClient};
pub use app::adapters::state_store::RotationStore;
pub use app::models::{AtisReport, BroadcastIdentifier, CanonicalSnapshot, RotationState};
pub use app::services::report_generator::ReportGenerator;
pub use config::{AtisConfig, Secrets};
pub use error::{AtisError, Result};
