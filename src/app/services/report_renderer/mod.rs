//! Report rendering
//!
//! Formats the fused snapshot into the spoken broadcast and the compact
//! data-link report. Both forms are pure functions of the snapshot, the
//! broadcast identifier, the runway in use and the configuration, and both
//! close with the acknowledgment phrase naming the identifier.
//!
//! ## Architecture
//!
//! - [`spoken`] - sentence per field, full words
//! - [`compact`] - uppercase line per field, abbreviated units
//! - [`runway`] - runway-in-use selection from the wind bearing
//!
//! Fields that are absent from the snapshot are left out of both forms.

pub mod compact;
pub mod runway;
pub mod spoken;

use crate::app::models::{BroadcastIdentifier, CanonicalSnapshot};
use crate::config::AtisConfig;

pub use runway::{designator, select_runway};

/// Both rendered forms of one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub spoken: String,
    pub compact: String,
}

/// Everything a renderer needs for one report
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub snapshot: &'a CanonicalSnapshot,
    pub identifier: BroadcastIdentifier,

    /// Heading of the runway in use
    pub runway: u16,
    pub config: &'a AtisConfig,
}

impl<'a> RenderInput<'a> {
    /// Input with the runway selected from the snapshot's wind bearing
    pub fn new(
        snapshot: &'a CanonicalSnapshot,
        identifier: BroadcastIdentifier,
        config: &'a AtisConfig,
    ) -> Self {
        let runway = select_runway(snapshot.wind_direction, config.aerodrome.runway_headings);
        Self {
            snapshot,
            identifier,
            runway,
            config,
        }
    }

    /// Whether the wind is at or below the calm threshold
    fn is_calm(&self) -> bool {
        self.snapshot
            .wind_speed
            .is_some_and(|speed| speed <= self.config.rendering.calm_wind_kt)
    }

    /// Whether visibility and sky allow CAVOK in place of both
    fn is_cavok(&self) -> bool {
        self.snapshot
            .visibility
            .is_some_and(|vis| vis > self.config.rendering.cavok_visibility_km)
            && self.snapshot.is_sky_clear()
    }

    /// Precipitation worth mentioning
    fn precipitation(&self) -> Option<f64> {
        self.snapshot.precipitation.filter(|mm| *mm > 0.0)
    }
}

/// Render both forms
pub fn render(input: &RenderInput<'_>) -> RenderedReport {
    RenderedReport {
        spoken: spoken::render(input),
        compact: compact::render(input),
    }
}

/// Whole number when the value is integral to one decimal, else one decimal
fn format_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

/// Temperature rounded to whole degrees
fn whole_degrees(celsius: f64) -> i64 {
    celsius.round() as i64
}
