//! Markup cleanup for the local station page
//!
//! Reduces the station's HTML page to plain `Label: value` lines that the
//! station normalizer can read.

use regex::Regex;
use std::sync::LazyLock;

static HIDDEN_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|head)\b.*?</(script|style|head)\s*>")
        .expect("static regex is valid")
});

static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|tr|li|h[1-6]|table)\s*>").expect("static regex is valid")
});

static CELL_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</t[dh]\s*>").expect("static regex is valid"));

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex is valid"));

static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("static regex is valid"));

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&deg;", "°"),
    ("&#176;", "°"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    // Last so an escaped entity is not decoded twice
    ("&amp;", "&"),
];

/// Strip markup and return trimmed, non-empty text lines
pub fn clean_html(html: &str) -> String {
    let text = HIDDEN_BLOCKS.replace_all(html, "");
    let text = LINE_BREAKS.replace_all(&text, "\n");
    let text = CELL_BREAKS.replace_all(&text, " ");
    let text = TAGS.replace_all(&text, "");

    let mut text = text.into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }

    text.lines()
        .map(|line| SPACES.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_html_produces_label_lines() {
        let html = r#"<html><head><title>Station</title><style>p { color: red; }</style></head>
<body>
  <h1>Cuatro&nbsp;Vientos</h1>
  <table>
    <tr><td>Updated:</td><td>16/10/2026 12:20</td></tr>
    <tr><td>Temperature:</td><td><b>18.4</b> &deg;C</td></tr>
  </table>
  <p>Wind: 15 km/h N<br>Pressure: 1016.2 hPa</p>
  <script>var x = "<p>Wind: 99 km/h</p>";</script>
</body></html>"#;

        assert_eq!(
            clean_html(html),
            "Cuatro Vientos\nUpdated: 16/10/2026 12:20\nTemperature: 18.4 °C\n\
             Wind: 15 km/h N\nPressure: 1016.2 hPa"
        );
    }

    #[test]
    fn test_plain_text_is_kept() {
        assert_eq!(clean_html("  Wind:   calm  \n\n"), "Wind: calm");
    }

    #[test]
    fn test_escaped_ampersand_decoded_once() {
        assert_eq!(clean_html("A &amp;lt; B"), "A &lt; B");
    }
}
