//! Runway-in-use selection

use crate::app::services::wind::angular_distance;

/// Pick the runway heading most aligned with the wind.
///
/// The heading with the smaller shortest-arc distance to the wind bearing
/// wins; a tie, or an unknown wind, goes to the lower-numbered heading.
pub fn select_runway(wind_direction: Option<u16>, headings: [u16; 2]) -> u16 {
    let [first, second] = headings;
    let lower = first.min(second);
    let higher = first.max(second);

    let Some(wind) = wind_direction else {
        return lower;
    };

    if angular_distance(wind, higher) < angular_distance(wind, lower) {
        higher
    } else {
        lower
    }
}

/// Two-digit runway designator for a heading, e.g. 100 -> `10`, 10 -> `01`
pub fn designator(heading: u16) -> String {
    let number = match (heading + 5) / 10 {
        0 => 36,
        n => n,
    };
    format!("{:02}", number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_favours_lower_heading() {
        assert_eq!(select_runway(Some(100), [10, 190]), 10);
        assert_eq!(select_runway(Some(190), [280, 100]), 100);
    }

    #[test]
    fn test_closest_heading_wins() {
        assert_eq!(select_runway(Some(250), [100, 280]), 280);
        assert_eq!(select_runway(Some(80), [100, 280]), 100);
        assert_eq!(select_runway(Some(360), [10, 190]), 10);
        assert_eq!(select_runway(Some(200), [10, 190]), 190);
    }

    #[test]
    fn test_unknown_wind_uses_lower_heading() {
        assert_eq!(select_runway(None, [280, 100]), 100);
    }

    #[test]
    fn test_designator() {
        assert_eq!(designator(100), "10");
        assert_eq!(designator(280), "28");
        assert_eq!(designator(10), "01");
        assert_eq!(designator(360), "36");
        assert_eq!(designator(184), "18");
    }
}
