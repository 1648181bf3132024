//! Formatting helpers for presenting metrics.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fallback shown whenever a metric value is absent.
pub const NO_DATA: &str = "No data";

/// Leading decimal number, tolerant of surrounding whitespace and trailing text.
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("valid leading number pattern")
});

/// First signed decimal token anywhere in a string (leftmost match only).
static SIGNED_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?[0-9]+\.?[0-9]*").expect("valid signed decimal pattern"));

/// Convert a duration in minutes into an hour label.
///
/// - `None` / NaN -> `"No data"`
/// - exactly one hour -> `"1 hour"`
/// - whole hours -> `"2 hours"`, `"0 hours"`
/// - anything else -> one decimal place, `"1.5 hours"`
pub fn format_minutes_to_hours(minutes: Option<f64>) -> String {
    match minutes {
        Some(minutes) if !minutes.is_nan() => format_hours(minutes / 60.0),
        _ => NO_DATA.to_string(),
    }
}

fn format_hours(hours: f64) -> String {
    if hours == 1.0 {
        "1 hour".to_string()
    } else if hours.fract() == 0.0 {
        format!("{} hours", format_number(hours))
    } else {
        // Ties round away from zero: 15 minutes is 0.3 hours, not 0.2.
        let rounded = (hours * 10.0).round() / 10.0;
        format!("{rounded:.1} hours")
    }
}

/// Hour label for a value that is already expressed in hours.
pub fn format_hour_count(hours: f64) -> String {
    if hours == 1.0 {
        "1 hour".to_string()
    } else {
        format!("{} hours", format_number(hours))
    }
}

/// Shortest round-trip rendering of a number: `72`, `72.5`, never `72.0` or `-0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Lenient float parse: reads the leading number and ignores whatever follows.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let token = LEADING_NUMBER.find(text)?;
    token.as_str().trim_start().parse().ok()
}

/// First signed decimal number embedded in `text` (`"+349"` yields `349`).
pub fn first_signed_decimal(text: &str) -> Option<f64> {
    let token = SIGNED_DECIMAL.find(text)?;
    token.as_str().parse().ok()
}
