//! Pure, platform-agnostic helpers that turn raw insight metrics into display text.

pub mod comparison;
pub mod format;
pub mod insight;
pub mod metric;

pub use comparison::{format_flare_up_trigger_value, format_metric_comparison};
pub use format::format_minutes_to_hours;
pub use metric::{format_metric_value, RawValue};
