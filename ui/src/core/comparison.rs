//! "today | typical | delta" comparison strings.
//!
//! The insights service describes a metric against the user's baseline as a
//! pipe-delimited string, optionally prefixed with the metric name:
//!
//! ```text
//! sedentaryMinutes: 723 today | 374 typical | +349
//! ```
//!
//! which is shown as
//!
//! ```text
//! Sedentary Time: 12.1 hours today | 6.2 hours typical (+5.8 hours)
//! ```
//!
//! Anything that does not parse is handed back untouched so the card still
//! shows the backend's text rather than nothing.

use once_cell::sync::Lazy;
use regex::Regex;

use super::format::first_signed_decimal;
use super::metric::{display_metric_name, format_metric_value, RawValue};

static TODAY_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)today").expect("valid today pattern"));
static TYPICAL_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)typical").expect("valid typical pattern"));

/// Numbers extracted from a comparison body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedComparison {
    pub today: f64,
    pub typical: f64,
    /// Explicit delta token, or `today - typical` when the body has none.
    pub delta: f64,
}

impl ParsedComparison {
    /// `"<today> today | <typical> typical<delta suffix>"` in the metric's units.
    pub fn render(&self, metric_name: &str) -> String {
        let today = format_metric_value(Some(metric_name), Some(&RawValue::Number(self.today)));
        let typical =
            format_metric_value(Some(metric_name), Some(&RawValue::Number(self.typical)));
        let suffix = delta_suffix(metric_name, self.delta);
        format!("{today} today | {typical} typical{suffix}")
    }
}

/// Parse `"<today> today | <typical> typical [| <delta>]"`.
///
/// Returns `None` with fewer than two segments or when either the today or
/// typical segment has no number.
pub fn parse_comparison_body(body: &str) -> Option<ParsedComparison> {
    let segments: Vec<&str> = body.split('|').collect();
    if segments.len() < 2 {
        return None;
    }

    let today = first_signed_decimal(&TODAY_LABEL.replace(segments[0], ""))?;
    let typical = first_signed_decimal(&TYPICAL_LABEL.replace(segments[1], ""))?;
    let delta = segments
        .get(2)
        .and_then(|segment| first_signed_decimal(segment))
        .unwrap_or(today - typical);

    Some(ParsedComparison {
        today,
        typical,
        delta,
    })
}

/// Split `"name: body"` into its metric name and body. Without a colon, or
/// with nothing before it, the whole string is the body.
pub fn split_metric_prefix(comparison: &str) -> (Option<&str>, &str) {
    match comparison.split_once(':') {
        Some((name, body)) if !name.trim().is_empty() => (Some(name.trim()), body),
        _ => (None, comparison),
    }
}

/// Format a full comparison string, including the metric name prefix.
pub fn format_metric_comparison(comparison: &str) -> String {
    if comparison.is_empty() {
        return String::new();
    }

    let (metric_name, body) = split_metric_prefix(comparison);
    let Some(parsed) = parse_comparison_body(body) else {
        tracing::debug!(comparison, "unparseable metric comparison");
        return comparison.to_string();
    };

    let rendered = parsed.render(metric_name.unwrap_or_default());
    match metric_name {
        Some(name) => format!("{}: {rendered}", display_metric_name(name)),
        None => rendered,
    }
}

/// Format a flare-up trigger value, which carries no name prefix; the metric
/// name comes from the trigger itself.
pub fn format_flare_up_trigger_value(metric_name: &str, value: &str) -> String {
    match parse_comparison_body(value) {
        Some(parsed) => parsed.render(metric_name),
        None => {
            tracing::debug!(metric = metric_name, value, "unparseable trigger value");
            value.to_string()
        }
    }
}

fn delta_suffix(metric_name: &str, delta: f64) -> String {
    if delta.is_nan() {
        return String::new();
    }
    if delta == 0.0 {
        return " (no change)".to_string();
    }

    let sign = if delta > 0.0 { '+' } else { '-' };
    let magnitude = format_metric_value(Some(metric_name), Some(&RawValue::Number(delta.abs())));
    format!(" ({sign}{magnitude})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_delta_wins() {
        let parsed = parse_comparison_body("723 today | 374 typical | +349").unwrap();
        assert_eq!(parsed.today, 723.0);
        assert_eq!(parsed.typical, 374.0);
        assert_eq!(parsed.delta, 349.0);
    }

    #[test]
    fn delta_is_derived_when_missing() {
        let parsed = parse_comparison_body("5 today | 8 typical").unwrap();
        assert_eq!(parsed.delta, -3.0);

        let parsed = parse_comparison_body("5 today | 8 typical | n/a").unwrap();
        assert_eq!(parsed.delta, -3.0);
    }

    #[test]
    fn labels_are_stripped_case_insensitively() {
        let parsed = parse_comparison_body("TODAY: 4.5 | Typical 3").unwrap();
        assert_eq!(parsed.today, 4.5);
        assert_eq!(parsed.typical, 3.0);
    }

    #[test]
    fn missing_numbers_fail_parse() {
        assert!(parse_comparison_body("none today | 3 typical").is_none());
        assert!(parse_comparison_body("3 today | none typical").is_none());
        assert!(parse_comparison_body("3 today").is_none());
    }

    #[test]
    fn prefix_split() {
        assert_eq!(
            split_metric_prefix("sleepDuration: 1 today | 2 typical"),
            (Some("sleepDuration"), " 1 today | 2 typical")
        );
        assert_eq!(
            split_metric_prefix(": 1 today | 2 typical"),
            (None, ": 1 today | 2 typical")
        );
        assert_eq!(split_metric_prefix("1 today | 2 typical"), (None, "1 today | 2 typical"));
    }

    #[test]
    fn delta_suffixes() {
        assert_eq!(delta_suffix("sedentaryMinutes", 0.0), " (no change)");
        assert_eq!(delta_suffix("sedentaryMinutes", -0.0), " (no change)");
        assert_eq!(delta_suffix("sedentaryMinutes", 349.0), " (+5.8 hours)");
        assert_eq!(delta_suffix("sedentaryMinutes", -90.0), " (-1.5 hours)");
        assert_eq!(delta_suffix("steps", -1200.0), " (-1200)");
        assert_eq!(delta_suffix("steps", f64::NAN), "");
    }

    #[test]
    fn opaque_metric_comparison() {
        assert_eq!(
            format_metric_comparison("heartRate: 72 today | 65 typical"),
            "Heart Rate: 72 today | 65 typical (+7)"
        );
    }

    #[test]
    fn comparison_without_name() {
        assert_eq!(
            format_metric_comparison("3 today | 3 typical"),
            "3 today | 3 typical (no change)"
        );
    }

    #[test]
    fn empty_comparison_is_unchanged() {
        assert_eq!(format_metric_comparison(""), "");
        assert_eq!(format_flare_up_trigger_value("sleepDuration", ""), "");
    }

    #[test]
    fn sleep_delta_uses_the_same_heuristic() {
        assert_eq!(
            format_metric_comparison("sleepDuration: 420 today | 480 typical"),
            "Sleep Duration: 7 hours today | 8 hours typical (-1 hour)"
        );
    }
}
