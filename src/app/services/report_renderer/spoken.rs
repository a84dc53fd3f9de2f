//! Spoken broadcast form

use super::{RenderInput, designator, format_decimal, whole_degrees};

/// Render the spoken report: one sentence per known field, space separated
pub fn render(input: &RenderInput<'_>) -> String {
    let snapshot = input.snapshot;
    let identifier = input.identifier.word();
    let mut sentences = vec![format!(
        "This is {} information {}.",
        input.config.aerodrome.name, identifier
    )];

    if let Some(time) = snapshot.observation_time {
        sentences.push(format!("Observation time {}.", time.with_marker()));
    }

    sentences.push(format!("Runway in use {}.", designator(input.runway)));

    if let Some(wind) = wind_sentence(input) {
        sentences.push(wind);
    }

    if let Some(gust) = snapshot.gust_speed {
        sentences.push(match snapshot.gust_direction {
            Some(direction) => format!("Gusting {} knots from {} degrees.", gust, direction),
            None => format!("Gusting {} knots.", gust),
        });
    }

    if let Some(variability) = snapshot.wind_variability {
        let (from, to) = variability.padded();
        sentences.push(format!("Wind variable between {} and {} degrees.", from, to));
    }

    if input.is_cavok() {
        sentences.push("CAVOK.".to_string());
    } else {
        if let Some(visibility) = snapshot.visibility {
            sentences.push(format!("Visibility {} kilometres.", format_decimal(visibility)));
        }
        if let Some(clouds) = cloud_sentence(input) {
            sentences.push(clouds);
        }
    }

    if let Some(phenomenon) = snapshot.phenomenon {
        sentences.push(format!("{}.", capitalize(phenomenon.spoken())));
    }

    if let Some(mm) = input.precipitation() {
        sentences.push(format!("Precipitation {} millimetres.", format_decimal(mm)));
    }

    if let Some(temperature) = snapshot.temperature {
        sentences.push(format!("Temperature {} degrees.", signed(temperature)));
    }
    if let Some(dew_point) = snapshot.dew_point {
        sentences.push(format!("Dew point {} degrees.", signed(dew_point)));
    }

    if let Some(qnh) = snapshot.qnh {
        sentences.push(format!("QNH {} hectopascals.", qnh.round() as i64));
    }

    sentences.push(format!(
        "Acknowledge information {} on initial contact.",
        identifier
    ));

    sentences.join(" ")
}

fn wind_sentence(input: &RenderInput<'_>) -> Option<String> {
    let snapshot = input.snapshot;
    if input.is_calm() {
        return Some("Wind calm.".to_string());
    }

    match (snapshot.wind_direction, snapshot.wind_speed) {
        (Some(direction), Some(speed)) => {
            Some(format!("Wind {} degrees {} knots.", direction, speed))
        }
        (None, Some(speed)) => Some(format!("Wind variable {} knots.", speed)),
        (Some(direction), None) => Some(format!("Wind {} degrees.", direction)),
        (None, None) => None,
    }
}

fn cloud_sentence(input: &RenderInput<'_>) -> Option<String> {
    let snapshot = input.snapshot;
    if snapshot.is_sky_clear() {
        return Some("Sky clear.".to_string());
    }

    let layers = snapshot.cloud_layers_long();
    if layers.is_empty() {
        return None;
    }

    Some(format!("Clouds {}.", layers.join(", ").to_lowercase()))
}

fn signed(celsius: f64) -> String {
    let degrees = whole_degrees(celsius);
    if degrees < 0 {
        format!("minus {}", -degrees)
    } else {
        degrees.to_string()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{
        BroadcastIdentifier, CanonicalSnapshot, CloudLayer, ObservationTime, Phenomenon, SkyCover,
        WindVariability,
    };
    use crate::config::AtisConfig;

    fn full_snapshot() -> CanonicalSnapshot {
        CanonicalSnapshot {
            wind_direction: Some(240),
            wind_speed: Some(12),
            gust_direction: Some(250),
            gust_speed: Some(22),
            wind_variability: Some(WindVariability { from: 210, to: 270 }),
            visibility: Some(9.0),
            temperature: Some(18.4),
            dew_point: Some(11.0),
            qnh: Some(1016.2),
            precipitation: Some(0.4),
            observation_time: ObservationTime::utc(10, 20),
            sky_octas: Some(7),
            cloud_layers: Some(vec![
                CloudLayer {
                    cover: SkyCover::Few,
                    altitude_ft: Some(1700),
                },
                CloudLayer {
                    cover: SkyCover::Broken,
                    altitude_ft: Some(5800),
                },
            ]),
            phenomenon: Some(Phenomenon::LightRain),
        }
    }

    #[test]
    fn test_full_report() {
        let config = AtisConfig::default();
        let snapshot = full_snapshot();
        let input = RenderInput::new(&snapshot, BroadcastIdentifier::new(0), &config);

        assert_eq!(
            render(&input),
            "This is Cuatro Vientos information Alpha. Observation time 10:20Z. \
             Runway in use 28. Wind 240 degrees 12 knots. \
             Gusting 22 knots from 250 degrees. \
             Wind variable between 210 and 270 degrees. Visibility 9 kilometres. \
             Clouds few 1700 feet, broken 5800 feet. Light rain. \
             Precipitation 0.4 millimetres. Temperature 18 degrees. \
             Dew point 11 degrees. QNH 1016 hectopascals. \
             Acknowledge information Alpha on initial contact."
        );
    }

    #[test]
    fn test_calm_wind_and_cavok() {
        let config = AtisConfig::default();
        let snapshot = CanonicalSnapshot {
            wind_direction: None,
            wind_speed: Some(0),
            visibility: Some(25.0),
            cloud_layers: Some(vec![CloudLayer::sky_clear()]),
            phenomenon: Some(Phenomenon::None),
            temperature: Some(-2.6),
            ..Default::default()
        };
        let input = RenderInput::new(&snapshot, BroadcastIdentifier::new(25), &config);
        let text = render(&input);

        assert!(text.contains("Runway in use 10."));
        assert!(text.contains("Wind calm."));
        assert!(text.contains("CAVOK."));
        assert!(!text.contains("Visibility"));
        assert!(!text.contains("Sky clear"));
        assert!(text.contains("No significant weather."));
        assert!(text.contains("Temperature minus 3 degrees."));
        assert!(text.ends_with("Acknowledge information Zulu on initial contact."));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let config = AtisConfig::default();
        let snapshot = CanonicalSnapshot::default();
        let input = RenderInput::new(&snapshot, BroadcastIdentifier::new(1), &config);

        assert_eq!(
            render(&input),
            "This is Cuatro Vientos information Bravo. Runway in use 10. \
             Acknowledge information Bravo on initial contact."
        );
    }

    #[test]
    fn test_gust_without_direction_and_sky_clear_with_low_visibility() {
        let config = AtisConfig::default();
        let snapshot = CanonicalSnapshot {
            wind_speed: Some(7),
            gust_speed: Some(18),
            visibility: Some(4.5),
            sky_octas: Some(0),
            observation_time: Some(ObservationTime::Invalid),
            ..Default::default()
        };
        let input = RenderInput::new(&snapshot, BroadcastIdentifier::new(3), &config);
        let text = render(&input);

        assert!(text.contains("Observation time invalid."));
        assert!(text.contains("Wind variable 7 knots."));
        assert!(text.contains("Gusting 18 knots."));
        assert!(text.contains("Visibility 4.5 kilometres."));
        assert!(text.contains("Sky clear."));
    }

    #[test]
    fn test_layers_without_altitude() {
        let config = AtisConfig::default();
        let snapshot = CanonicalSnapshot {
            sky_octas: Some(4),
            ..Default::default()
        };
        let input = RenderInput::new(&snapshot, BroadcastIdentifier::new(0), &config);
        assert!(render(&input).contains("Clouds scattered."));
    }
}
