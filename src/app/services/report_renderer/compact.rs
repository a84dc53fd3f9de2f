//! Compact data-link form

use super::{RenderInput, designator, format_decimal, whole_degrees};

/// Render the compact report: one uppercase line per known field
pub fn render(input: &RenderInput<'_>) -> String {
    let snapshot = input.snapshot;
    let mut lines = vec![format!(
        "{} ATIS {}",
        input.config.aerodrome.icao,
        input.identifier.letter()
    )];

    if let Some(time) = snapshot.observation_time {
        lines.push(format!("TIME {}", time.compact()));
    }

    lines.push(format!("RWY {}", designator(input.runway)));

    if let Some(wind) = wind_line(input) {
        lines.push(wind);
    }

    if let Some(gust) = snapshot.gust_speed {
        lines.push(match snapshot.gust_direction {
            Some(direction) => format!("GUST {:03}/{}KT", direction, gust),
            None => format!("GUST {}KT", gust),
        });
    }

    if let Some(variability) = snapshot.wind_variability {
        lines.push(format!("VRB {}", variability));
    }

    if input.is_cavok() {
        lines.push("CAVOK".to_string());
    } else {
        if let Some(visibility) = snapshot.visibility {
            lines.push(format!("VIS {}KM", format_decimal(visibility)));
        }
        let layers = snapshot.cloud_layers_short();
        if !layers.is_empty() {
            lines.push(format!("CLD {}", layers.join(" ")));
        }
    }

    if let Some(phenomenon) = snapshot.phenomenon {
        lines.push(format!("WX {}", phenomenon.code()));
    }

    if let Some(mm) = input.precipitation() {
        lines.push(format!("PRECIP {}MM", format_decimal(mm)));
    }

    if let Some(temperature) = snapshot.temperature {
        lines.push(format!("TEMP {}", signed(temperature)));
    }
    if let Some(dew_point) = snapshot.dew_point {
        lines.push(format!("DEWPT {}", signed(dew_point)));
    }

    if let Some(qnh) = snapshot.qnh {
        lines.push(format!("QNH {}HPA", qnh.round() as i64));
    }

    lines.push(format!(
        "ACKNOWLEDGE INFORMATION {} ON INITIAL CONTACT",
        input.identifier.word()
    ));

    lines.join("\n").to_uppercase()
}

fn wind_line(input: &RenderInput<'_>) -> Option<String> {
    let snapshot = input.snapshot;
    if input.is_calm() {
        return Some("WIND CALM".to_string());
    }

    match (snapshot.wind_direction, snapshot.wind_speed) {
        (Some(direction), Some(speed)) => Some(format!("WIND {:03}/{}KT", direction, speed)),
        (None, Some(speed)) => Some(format!("WIND VRB/{}KT", speed)),
        (Some(direction), None) => Some(format!("WIND {:03}", direction)),
        (None, None) => None,
    }
}

/// Negative values carry the `M` prefix
fn signed(celsius: f64) -> String {
    let degrees = whole_degrees(celsius);
    if degrees < 0 {
        format!("M{}", -degrees)
    } else {
        degrees.to_string()
    }
}
