//! Insight card payloads as delivered by the insights service.

use serde::{Deserialize, Serialize};

use super::comparison::{format_flare_up_trigger_value, format_metric_comparison};
use super::metric::{display_metric_name, format_metric_value, RawValue};

/// A single metric value, e.g. `{ "metric": "sleepDuration", "value": 420 }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricReading {
    pub metric: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawValue>,
}

impl MetricReading {
    pub fn display_value(&self) -> String {
        format_metric_value(Some(&self.metric), self.value.as_ref())
    }
}

/// A raw `"name: today | typical | delta"` string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MetricComparison {
    pub comparison: String,
}

impl MetricComparison {
    pub fn display(&self) -> String {
        format_metric_comparison(&self.comparison)
    }
}

/// A metric flagged as a possible flare-up trigger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlareUpTrigger {
    pub metric: String,
    pub value: String,
}

impl FlareUpTrigger {
    pub fn display_name(&self) -> String {
        display_metric_name(&self.metric)
    }

    pub fn display_value(&self) -> String {
        format_flare_up_trigger_value(&self.metric, &self.value)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub readings: Vec<MetricReading>,
    #[serde(default)]
    pub comparisons: Vec<MetricComparison>,
    #[serde(default)]
    pub triggers: Vec<FlareUpTrigger>,
}

impl Insight {
    /// Decode a payload; malformed payloads yield `None` rather than an error.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(insight) => Some(insight),
            Err(err) => {
                tracing::debug!(%err, "discarding malformed insight payload");
                None
            }
        }
    }

    /// Every formatted line of the card, in payload order: readings,
    /// comparisons, then triggers (`"<name>: <value>"`).
    pub fn display_lines(&self) -> Vec<String> {
        let readings = self.readings.iter().map(|reading| {
            format!(
                "{}: {}",
                display_metric_name(&reading.metric),
                reading.display_value()
            )
        });
        let comparisons = self.comparisons.iter().map(MetricComparison::display);
        let triggers = self
            .triggers
            .iter()
            .map(|trigger| format!("{}: {}", trigger.display_name(), trigger.display_value()));

        readings.chain(comparisons).chain(triggers).collect()
    }
}
