//! Metric classification and single-value formatting.
//!
//! The insights backend is not consistent about units: sleep duration may
//! arrive in minutes or already converted to hours, sedentary time always
//! arrives in minutes. Metric names are matched loosely (substrings, any
//! case) so naming variants like `sedentaryMinutes` / `sedentary_min` land in
//! the same bucket.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use super::format::{
    format_hour_count, format_minutes_to_hours, format_number, parse_leading_number, NO_DATA,
};

/// Sleep values above this are minutes; at or below it they are hours.
const SLEEP_MINUTES_THRESHOLD: f64 = 2.0;

/// Case-insensitive renames applied after the generic name normalisation.
/// Order matters: "Sedentary Minutes" must win over "Sedentary Min".
const DISPLAY_RENAMES: &[(&str, &str)] = &[
    ("Sleep Duration", "Sleep Duration"),
    ("Sedentary Minutes", "Sedentary Time"),
    ("Sedentary Min", "Sedentary Time"),
    ("Night Wake Ups", "Night Wake-ups"),
    ("Night WakeUps", "Night Wake-ups"),
];

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid camel case pattern"));

static RENAME_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    DISPLAY_RENAMES
        .iter()
        .map(|(from, to)| {
            let pattern = format!("(?i){}", regex::escape(from));
            (Regex::new(&pattern).expect("valid rename pattern"), *to)
        })
        .collect()
});

/// How a metric's numeric value should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Value is always minutes (sedentary time).
    MinutesAlwaysConvert,
    /// Value may be minutes or hours; values above 2 are taken as minutes.
    HoursWithMinutesHeuristic,
    /// Anything else: echoed as-is.
    Opaque,
}

impl MetricKind {
    pub fn classify(metric_name: &str) -> Self {
        let name = metric_name.to_lowercase();
        if name.contains("sleepduration") || name == "sleep duration" {
            Self::HoursWithMinutesHeuristic
        } else if name.contains("sedentary") && (name.contains("minute") || name.contains("min")) {
            Self::MinutesAlwaysConvert
        } else {
            Self::Opaque
        }
    }

    /// Render a parsed number. `None` for [`MetricKind::Opaque`], whose
    /// callers show the original value instead.
    pub fn render(self, value: f64) -> Option<String> {
        match self {
            Self::MinutesAlwaysConvert => Some(format_minutes_to_hours(Some(value))),
            Self::HoursWithMinutesHeuristic if value > SLEEP_MINUTES_THRESHOLD => {
                Some(format_minutes_to_hours(Some(value)))
            }
            Self::HoursWithMinutesHeuristic => Some(format_hour_count(value)),
            Self::Opaque => None,
        }
    }
}

/// A raw metric value as shipped by the insights service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => parse_leading_number(text),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Format a single metric value for display.
///
/// Absent or empty values become `"No data"`. Values that are present but
/// not numeric are returned unchanged.
pub fn format_metric_value(metric_name: Option<&str>, value: Option<&RawValue>) -> String {
    let Some(value) = value.filter(|value| !value.is_blank()) else {
        return NO_DATA.to_string();
    };

    let number = match value.as_number() {
        Some(number) if !number.is_nan() => number,
        _ => {
            tracing::debug!(metric = metric_name, %value, "metric value is not numeric");
            return value.to_string();
        }
    };

    MetricKind::classify(metric_name.unwrap_or_default())
        .render(number)
        .unwrap_or_else(|| value.to_string())
}

/// Human label for a metric identifier: `sedentaryMinutes` -> `Sedentary Time`.
///
/// A space is inserted only where a lowercase letter or digit is followed by
/// a capital, so runs of capitals stay together (`restingHRV` ->
/// `Resting HRV`) and already spaced names (`Sleep Duration`) are unchanged.
pub fn display_metric_name(metric_name: &str) -> String {
    let spaced = CAMEL_BOUNDARY.replace_all(metric_name.trim(), "$1 $2");
    let spaced = spaced.replace('_', " ");

    let mut chars = spaced.chars();
    let mut display = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };

    for (pattern, replacement) in RENAME_PATTERNS.iter() {
        display = pattern.replace(&display, NoExpand(*replacement)).into_owned();
    }
    display
}
