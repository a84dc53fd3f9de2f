//! Scalar unit conversions between provider units and report units
//!
//! Every conversion degrades to zero on non-finite input (and on negative
//! input for speeds) instead of failing the pipeline.

use crate::constants::{KELVIN_OFFSET, KMH_TO_KNOTS, MPS_TO_KNOTS, PA_TO_HPA};

/// Kilometres per hour to whole knots
pub fn kmh_to_knots(kmh: f64) -> u32 {
    if !kmh.is_finite() || kmh < 0.0 {
        return 0;
    }
    (kmh * KMH_TO_KNOTS).round() as u32
}

/// Metres per second to knots, unrounded; callers round at the point of use
pub fn mps_to_knots(mps: f64) -> f64 {
    if !mps.is_finite() || mps < 0.0 {
        return 0.0;
    }
    mps * MPS_TO_KNOTS
}

/// Pascals to hectopascals
pub fn pa_to_hpa(pa: f64) -> f64 {
    if !pa.is_finite() {
        return 0.0;
    }
    pa * PA_TO_HPA
}

/// Kelvin to degrees Celsius
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    if !kelvin.is_finite() {
        return 0.0;
    }
    kelvin - KELVIN_OFFSET
}
