use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::Transform;
use crate::error::{ChartError, ChartResult};

/// Upper bound on lines emitted for one axis, whatever the step selection says.
pub const MAX_TICKS_PER_AXIS: usize = 512;

const PRICE_DEGENERATE_EPSILON: f64 = 1e-12;
const NICE_MULTIPLIERS: [f64; 3] = [1.0, 2.0, 5.0];

/// Tick density controls shared by both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub min_ticks: usize,
    pub max_ticks: usize,
    /// Narrows `max_ticks` on short axes so lines stay at least this far apart.
    pub min_tick_spacing_px: f64,
    /// Every n-th price step multiple is major.
    pub price_major_every: i64,
    /// Offset applied to time tick alignment and labels.
    pub utc_offset_minutes: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_ticks: 5,
            max_ticks: 8,
            min_tick_spacing_px: 24.0,
            price_major_every: 5,
            utc_offset_minutes: 0,
        }
    }
}

impl GridConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if self.min_ticks == 0 || self.max_ticks < self.min_ticks {
            return Err(ChartError::InvalidInput(
                "grid tick window must satisfy 0 < min_ticks <= max_ticks".to_owned(),
            ));
        }
        if !self.min_tick_spacing_px.is_finite() || self.min_tick_spacing_px < 0.0 {
            return Err(ChartError::InvalidInput(
                "grid min tick spacing must be finite and >= 0".to_owned(),
            ));
        }
        if self.price_major_every <= 0 {
            return Err(ChartError::InvalidInput(
                "price major multiple must be > 0".to_owned(),
            ));
        }
        if self.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ChartError::InvalidInput(
                "utc offset must be within one day".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn utc_offset_ms(self) -> i64 {
        i64::from(self.utc_offset_minutes) * 60_000
    }

    /// Tick-count window for an axis `extent_px` long.
    #[must_use]
    pub fn tick_window(self, extent_px: f64) -> (f64, f64) {
        let spacing_cap = if self.min_tick_spacing_px > 0.0 && extent_px.is_finite() {
            ((extent_px / self.min_tick_spacing_px).floor() as usize).max(1)
        } else {
            self.max_ticks
        };
        let max_ticks = self.max_ticks.min(spacing_cap);
        let min_ticks = self.min_ticks.min(max_ticks);
        (min_ticks as f64, max_ticks as f64)
    }
}

/// One grid line on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine<V> {
    pub position_px: f64,
    pub value: V,
    pub is_major: bool,
}

/// Step of the time-axis palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStep {
    pub millis: i64,
    /// Every n-th step multiple is major.
    pub major_every: i64,
}

const fn step(millis: i64, major_every: i64) -> TimeStep {
    TimeStep {
        millis,
        major_every,
    }
}

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const YEAR: i64 = 365 * DAY;

/// Duration palette for the time axis, ascending.
pub const TIME_STEP_PALETTE: [TimeStep; 33] = [
    step(10, 5),
    step(20, 5),
    step(50, 2),
    step(100, 5),
    step(200, 5),
    step(500, 2),
    step(SECOND, 5),
    step(5 * SECOND, 6),
    step(15 * SECOND, 4),
    step(30 * SECOND, 2),
    step(MINUTE, 5),
    step(5 * MINUTE, 3),
    step(15 * MINUTE, 4),
    step(30 * MINUTE, 2),
    step(HOUR, 6),
    step(3 * HOUR, 2),
    step(6 * HOUR, 4),
    step(12 * HOUR, 2),
    step(DAY, 7),
    step(2 * DAY, 5),
    step(7 * DAY, 4),
    step(30 * DAY, 3),
    step(90 * DAY, 4),
    step(YEAR, 5),
    step(2 * YEAR, 5),
    step(5 * YEAR, 2),
    step(10 * YEAR, 5),
    step(25 * YEAR, 4),
    step(50 * YEAR, 2),
    step(100 * YEAR, 5),
    step(250 * YEAR, 4),
    step(500 * YEAR, 2),
    step(1_000 * YEAR, 5),
];

/// Price-axis ticks with the step they were generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceGrid {
    pub step: f64,
    pub lines: Vec<GridLine<f64>>,
}

/// Time-axis ticks with the palette step they were generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    pub step: TimeStep,
    pub lines: Vec<GridLine<i64>>,
}

/// Picks the first candidate whose `span / step` falls inside `window`.
///
/// Candidates must be ascending. When none fits, the candidate whose tick
/// count is closest to the window wins, smaller steps first on ties.
fn select_step<T: Copy>(
    span: f64,
    candidates: impl IntoIterator<Item = (T, f64)>,
    window: (f64, f64),
) -> Option<T> {
    let (min_count, max_count) = window;
    let mut best: Option<(T, f64)> = None;

    for (candidate, step) in candidates {
        let count = span / step;
        if count >= min_count && count <= max_count {
            return Some(candidate);
        }
        let distance = if count < min_count {
            min_count - count
        } else {
            count - max_count
        };
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Chooses a `{1, 2, 5} x 10^k` step for `span` under `window`.
#[must_use]
pub fn nice_price_step(span: f64, window: (f64, f64)) -> f64 {
    let rough = span / window.1.max(1.0);
    let exponent = rough.log10().floor() as i32;
    let candidates = (exponent - 1..=exponent + 2).flat_map(|power| {
        let magnitude = 10f64.powi(power);
        NICE_MULTIPLIERS.map(|multiplier| {
            let step = multiplier * magnitude;
            (step, step)
        })
    });
    select_step(span, candidates, window).unwrap_or(rough)
}

/// Chooses the palette step for a time span of `span_ms` under `window`.
#[must_use]
pub fn nice_time_step(span_ms: f64, window: (f64, f64)) -> TimeStep {
    let candidates = TIME_STEP_PALETTE
        .iter()
        .map(|step| (*step, step.millis as f64));
    select_step(span_ms, candidates, window).unwrap_or(TIME_STEP_PALETTE[0])
}

/// Number of decimals needed to print multiples of `step` exactly.
#[must_use]
pub fn step_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

fn round_to_decimals(value: f64, decimals: usize) -> f64 {
    if decimals == 0 {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Visible tick multiples `first..=last`, capped at `MAX_TICKS_PER_AXIS` lines.
fn capped_multiples(first: i64, last: i64) -> RangeInclusive<i64> {
    first..=last.min(first.saturating_add(MAX_TICKS_PER_AXIS as i64 - 1))
}

/// Largest divisor of `major_every` that hits at least one visible multiple.
///
/// Narrow tick windows can skip every multiple of `major_every`; falling back
/// to its divisors keeps at least one labelled line on a non-empty axis while
/// majors stay nested inside the full-strength ones.
fn effective_major_every(multiples: RangeInclusive<i64>, major_every: i64) -> i64 {
    (1..=major_every.max(1))
        .rev()
        .filter(|divisor| major_every % divisor == 0)
        .find(|divisor| {
            multiples
                .clone()
                .any(|multiple| multiple.rem_euclid(*divisor) == 0)
        })
        .unwrap_or(1)
}

/// Generates price grid lines for the transform's visible price range.
///
/// A non-empty grid always carries at least one major line.
#[must_use]
pub fn price_grid(transform: Transform, config: GridConfig) -> PriceGrid {
    let (price_min, price_max) = transform.price_domain();
    let span = price_max - price_min;
    let magnitude = price_min.abs().max(price_max.abs()).max(1.0);

    if span <= PRICE_DEGENERATE_EPSILON * magnitude {
        let value = price_min + span / 2.0;
        return PriceGrid {
            step: 0.0,
            lines: vec![GridLine {
                position_px: transform.price_to_y(value),
                value,
                is_major: true,
            }],
        };
    }

    let window = config.tick_window(transform.plot().height);
    let step = nice_price_step(span, window);
    let decimals = step_decimals(step);
    let first = (price_min / step).ceil();
    let last = (price_max / step).floor();
    if !first.is_finite() || !last.is_finite() || first.abs() > 9.0e15 || last.abs() > 9.0e15 {
        return PriceGrid {
            step,
            lines: Vec::new(),
        };
    }

    let multiples = capped_multiples(first as i64, last as i64);
    let major_every = effective_major_every(multiples.clone(), config.price_major_every);
    let lines = multiples
        .map(|multiple| {
            let value = round_to_decimals(multiple as f64 * step, decimals);
            GridLine {
                position_px: transform.price_to_y(value),
                value,
                is_major: multiple.rem_euclid(major_every) == 0,
            }
        })
        .collect();

    PriceGrid { step, lines }
}

/// Generates time grid lines for the transform's visible time range.
///
/// Ticks sit on multiples of the step counted from the epoch in the
/// configured UTC offset, so daily ticks land on local midnight. A non-empty
/// grid always carries at least one major line.
#[must_use]
pub fn time_grid(transform: Transform, config: GridConfig) -> TimeGrid {
    let (time_start, time_end) = transform.time_domain();
    let (time_start, time_end) = (time_start.ceil() as i64, time_end.floor() as i64);
    let span = time_end.saturating_sub(time_start);

    if span < 1 {
        return TimeGrid {
            step: TIME_STEP_PALETTE[0],
            lines: vec![GridLine {
                position_px: transform.time_to_x(time_start),
                value: time_start,
                is_major: true,
            }],
        };
    }

    let window = config.tick_window(transform.plot().width);
    let step = nice_time_step(span as f64, window);
    let offset = config.utc_offset_ms();
    let first = (time_start.saturating_add(offset)).div_euclid(step.millis)
        + i64::from((time_start.saturating_add(offset)).rem_euclid(step.millis) != 0);
    let last = (time_end.saturating_add(offset)).div_euclid(step.millis);

    let multiples = capped_multiples(first, last);
    let major_every = effective_major_every(multiples.clone(), step.major_every);
    let lines = multiples
        .map(|multiple| {
            let timestamp = multiple.saturating_mul(step.millis).saturating_sub(offset);
            GridLine {
                position_px: transform.time_to_x(timestamp),
                value: timestamp,
                is_major: multiple.rem_euclid(major_every) == 0,
            }
        })
        .collect();

    TimeGrid { step, lines }
}
