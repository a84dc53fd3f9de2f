//! Wind vector arithmetic
//!
//! Converts orthogonal wind components into a speed and a compass bearing
//! the wind blows from, and computes the shortest-arc variability between
//! two bearings.
//!
//! Bearings handed to the rest of the crate are integers in 1-360: a wind
//! from north is reported as 360, never 0.

use super::units::mps_to_knots;
use crate::app::models::WindVariability;

/// Wind speed and direction derived from components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindVector {
    /// Speed in knots, unrounded
    pub speed_kt: f64,

    /// Bearing the wind blows from, in [0, 360)
    pub direction_deg: f64,
}

impl WindVector {
    /// Build from the eastward (`u`) and northward (`v`) components in m/s.
    ///
    /// The arctangent gives a mathematical bearing (0 = east, counter-clockwise)
    /// which is turned into a compass bearing (0 = north, clockwise) and then
    /// reversed to the direction the wind comes from. For a zero vector the
    /// direction is 270 and carries no meaning.
    pub fn from_components(u: f64, v: f64) -> Self {
        let speed_kt = mps_to_knots(u.hypot(v));

        let mathematical = v.atan2(u).to_degrees();
        let compass = 90.0 - mathematical;
        let direction_deg = normalize_degrees(compass + 180.0);

        Self {
            speed_kt,
            direction_deg,
        }
    }

    /// Whole knots
    pub fn rounded_speed(&self) -> u32 {
        self.speed_kt.round() as u32
    }

    /// Bearing to the nearest 10 degrees, as forecast bearings are reported
    pub fn bearing_to_ten(&self) -> u16 {
        round_bearing_to_ten(self.direction_deg)
    }

    /// Bearing to the nearest degree, as observed bearings are reported
    pub fn bearing_to_degree(&self) -> u16 {
        round_bearing(self.direction_deg)
    }
}

/// Wrap any angle into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Round to a whole-degree bearing in 1-360
pub fn round_bearing(degrees: f64) -> u16 {
    to_report_bearing(normalize_degrees(degrees).round() as u16)
}

/// Round to a 10-degree bearing in 10-360
pub fn round_bearing_to_ten(degrees: f64) -> u16 {
    let tens = (normalize_degrees(degrees) / 10.0).round() as u16;
    to_report_bearing(tens * 10)
}

/// Map 0 (and 360) to 360
fn to_report_bearing(bearing: u16) -> u16 {
    match bearing % 360 {
        0 => 360,
        b => b,
    }
}

/// Shortest angular distance between two bearings, 0-180
pub fn angular_distance(a: u16, b: u16) -> u16 {
    let diff = (i32::from(a % 360) - i32::from(b % 360)).unsigned_abs() as u16;
    diff.min(360 - diff)
}

/// Variability between two bearings.
///
/// Returns `None` if either bearing is unknown or both are the same. When
/// the shortest arc stays clear of north the lower bearing comes first;
/// when it crosses north the bearing nearer 360 comes first. No minimum
/// arc or speed is required before variability is reported.
pub fn variability(first: Option<u16>, second: Option<u16>) -> Option<WindVariability> {
    let (a, b) = (first?, second?);
    if a % 360 == b % 360 {
        return None;
    }

    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let absolute = high - low;
    let complementary = 360 - absolute;

    if absolute <= complementary {
        Some(WindVariability {
            from: low,
            to: high,
        })
    } else {
        Some(WindVariability {
            from: high,
            to: low,
        })
    }
}
