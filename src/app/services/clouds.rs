//! Cloud cover estimation
//!
//! Maps per-layer cloud cover percentages from the forecast model to octas
//! and sky codes, and estimates each layer's altitude from QNH with a linear
//! pressure-height approximation.

use crate::app::models::{CloudLayer, SkyCover};
use crate::constants::{cloud_cover, layer_pressure};

/// Representative octas for a cloud cover percentage
pub fn percent_to_octas(percent: f64) -> u8 {
    if !percent.is_finite() {
        return 0;
    }
    if percent >= cloud_cover::OVERCAST_PCT {
        8
    } else if percent >= cloud_cover::BROKEN_PCT {
        7
    } else if percent >= cloud_cover::SCATTERED_PCT {
        4
    } else if percent >= cloud_cover::FEW_PCT {
        2
    } else {
        0
    }
}

/// Long sky descriptor for an octas value
pub fn octas_to_code(octas: u8) -> &'static str {
    SkyCover::from_octas(octas).code()
}

/// Short sky descriptor for an octas value
pub fn octas_to_short_code(octas: u8) -> &'static str {
    SkyCover::from_octas(octas).short_code()
}

/// Estimated altitude in feet of the layer at `reference_hpa` for a given QNH,
/// rounded to the nearest 100 ft and never negative
pub fn estimate_altitude(qnh: f64, reference_hpa: f64) -> u32 {
    let feet = ((qnh - reference_hpa) * layer_pressure::FEET_PER_HPA).max(0.0);
    if !feet.is_finite() {
        return 0;
    }
    let steps = (feet / layer_pressure::ALTITUDE_STEP_FT).round();
    (steps * layer_pressure::ALTITUDE_STEP_FT) as u32
}

/// Cloud cover percentages of the three forecast layers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayerCover {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

/// Estimated cloud layers, lowest first.
///
/// Layers with zero octas are dropped; when nothing is left the single
/// sky-clear layer is returned so the result is never empty. Without QNH the
/// altitudes stay unknown.
pub fn estimate_layers(cover: LayerCover, qnh: Option<f64>) -> Vec<CloudLayer> {
    let levels = [
        (cover.low, layer_pressure::LOW_HPA),
        (cover.mid, layer_pressure::MID_HPA),
        (cover.high, layer_pressure::HIGH_HPA),
    ];

    let layers: Vec<CloudLayer> = levels
        .iter()
        .filter_map(|&(percent, reference)| {
            let octas = percent_to_octas(percent);
            (octas > 0).then(|| CloudLayer {
                cover: SkyCover::from_octas(octas),
                altitude_ft: qnh.map(|q| estimate_altitude(q, reference)),
            })
        })
        .collect();

    if layers.is_empty() {
        vec![CloudLayer::sky_clear()]
    } else {
        layers
    }
}

/// Overall sky octas: the most covered layer
pub fn total_octas(layers: &[CloudLayer]) -> u8 {
    layers.iter().map(|l| l.cover.octas()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_to_octas_boundaries() {
        let cases = [
            (0.0, 0),
            (1.0, 2),
            (24.0, 2),
            (25.0, 4),
            (50.0, 4),
            (51.0, 7),
            (87.0, 7),
            (88.0, 8),
            (100.0, 8),
        ];
        for (percent, expected) in cases {
            assert_eq!(percent_to_octas(percent), expected, "{}%", percent);
        }
    }

    #[test]
    fn test_zero_cover_is_sky_clear() {
        assert_eq!(octas_to_code(percent_to_octas(0.0)), "SKY CLEAR");
        assert_eq!(octas_to_short_code(percent_to_octas(0.0)), "SKC");
        assert_eq!(percent_to_octas(-3.0), 0);
        assert_eq!(percent_to_octas(f64::NAN), 0);
    }

    #[test]
    fn test_estimate_altitude() {
        assert_eq!(estimate_altitude(1013.0, 800.0), 5800);
        assert_eq!(estimate_altitude(1013.0, 950.0), 1700);
        // Pressure below the reference level clamps to the ground
        assert_eq!(estimate_altitude(790.0, 800.0), 0);
    }

    #[test]
    fn test_estimate_layers_with_qnh() {
        let layers = estimate_layers(
            LayerCover {
                low: 30.0,
                mid: 0.0,
                high: 90.0,
            },
            Some(1013.0),
        );
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].describe_short(), "SCT017");
        assert_eq!(layers[1].cover, SkyCover::Overcast);
        assert_eq!(total_octas(&layers), 8);
    }

    #[test]
    fn test_estimate_layers_clear_sky_never_empty() {
        let layers = estimate_layers(LayerCover::default(), Some(1020.0));
        assert_eq!(layers, vec![CloudLayer::sky_clear()]);
        assert_eq!(total_octas(&layers), 0);
    }

    #[test]
    fn test_estimate_layers_without_qnh_has_unknown_altitudes() {
        let layers = estimate_layers(
            LayerCover {
                low: 60.0,
                mid: 0.0,
                high: 0.0,
            },
            None,
        );
        assert_eq!(layers[0].altitude_ft, None);
        assert_eq!(layers[0].describe(), "BROKEN");
    }
}
