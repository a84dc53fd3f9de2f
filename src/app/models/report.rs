//! Data models for generated reports and per-provider diagnostics
//!
//! A report always carries the raw record of each provider so a caller can
//! see which sources contributed and why the others did not.

use super::{BroadcastIdentifier, CanonicalSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Provider Records
// =============================================================================

/// Outcome of one provider's contribution, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceRecord {
    /// Payload retrieved and normalized
    Fetched { payload: serde_json::Value },

    /// Transport failure or non-success response
    FetchFailed { message: String },

    /// Payload retrieved but not in the expected shape
    ParseFailed { message: String },

    /// Provider has no endpoint configured
    NotConfigured,
}

impl SourceRecord {
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed {
            message: message.into(),
        }
    }

    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self::ParseFailed {
            message: message.into(),
        }
    }

    /// Whether this provider contributed to the snapshot
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }
}

/// Records for all three providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecords {
    pub forecast: SourceRecord,
    pub agency: SourceRecord,
    pub station: SourceRecord,
}

impl SourceRecords {
    /// Number of providers that contributed
    pub fn fetched_count(&self) -> usize {
        [&self.forecast, &self.agency, &self.station]
            .into_iter()
            .filter(|r| r.is_fetched())
            .count()
    }
}

impl Default for SourceRecords {
    fn default() -> Self {
        Self {
            forecast: SourceRecord::NotConfigured,
            agency: SourceRecord::NotConfigured,
            station: SourceRecord::NotConfigured,
        }
    }
}

// =============================================================================
// ATIS Report
// =============================================================================

/// Result of one report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtisReport {
    /// Identifier on air, absent for failed reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<BroadcastIdentifier>,

    /// Spoken-style report
    pub spoken: String,

    /// Compact data-link report
    pub compact: String,

    /// Fused snapshot the reports were rendered from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<CanonicalSnapshot>,

    pub sources: SourceRecords,

    pub generated_at: DateTime<Utc>,

    /// Set when generation failed and the report fields carry the error
    pub failed: bool,
}

impl AtisReport {
    /// Error-shaped report embedding `message` in both report fields
    pub fn failure(message: &str, sources: SourceRecords, generated_at: DateTime<Utc>) -> Self {
        let text = format!("Error generating ATIS: {}", message);
        Self {
            identifier: None,
            spoken: text.clone(),
            compact: text.to_uppercase(),
            snapshot: None,
            sources,
            generated_at,
            failed: true,
        }
    }
}
