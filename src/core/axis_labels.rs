use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::core::grid::{TimeStep, step_decimals};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const DAY_MS: i64 = 24 * 60 * MINUTE_MS;

/// chrono pattern for labels of a time axis stepping by `step`.
#[must_use]
pub fn time_label_pattern(step: TimeStep) -> &'static str {
    match step.millis {
        millis if millis < SECOND_MS => "%H:%M:%S%.3f",
        millis if millis < MINUTE_MS => "%H:%M:%S",
        millis if millis < DAY_MS => "%H:%M",
        millis if millis < 90 * DAY_MS => "%b %d",
        millis if millis < 365 * DAY_MS => "%b %Y",
        _ => "%Y",
    }
}

/// Formats an epoch-millis timestamp for a time-axis label.
///
/// Timestamps chrono cannot represent fall back to the raw millis.
#[must_use]
pub fn format_time_label(timestamp_ms: i64, step: TimeStep, utc_offset_minutes: i32) -> String {
    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
        return timestamp_ms.to_string();
    };
    let offset = FixedOffset::east_opt(utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix());
    dt.with_timezone(&offset)
        .format(time_label_pattern(step))
        .to_string()
}

/// Formats a price-axis label with the decimals implied by `step`.
#[must_use]
pub fn format_price_label(price: f64, step: f64) -> String {
    if !price.is_finite() {
        return "nan".to_owned();
    }
    let decimals = if step > 0.0 { step_decimals(step) } else { 2 };
    format!("{price:.decimals$}")
}
