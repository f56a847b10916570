use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{DataBounds, MAX_ABS_TIMESTAMP_MS, PlotSize};
use crate::error::{ChartError, ChartResult};

/// Tuning controls for fitting, panning and zooming the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportTuning {
    /// Symmetric padding added above and below the fitted price span.
    pub price_padding_ratio: f64,
    pub min_time_span_ms: i64,
    pub max_time_span_ms: i64,
    pub min_price_span: f64,
    pub max_price_span: f64,
    /// Wheel delta `d` scales both spans by `wheel_zoom_base ^ d`.
    pub wheel_zoom_base: f64,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            price_padding_ratio: 0.05,
            min_time_span_ms: 1_000,
            // One century.
            max_time_span_ms: 3_155_760_000_000,
            min_price_span: 1e-6,
            max_price_span: 1e12,
            wheel_zoom_base: 1.001,
        }
    }
}

impl ViewportTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.price_padding_ratio.is_finite() || self.price_padding_ratio < 0.0 {
            return Err(ChartError::InvalidInput(
                "price padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if self.min_time_span_ms <= 0 || self.max_time_span_ms < self.min_time_span_ms {
            return Err(ChartError::InvalidInput(
                "time span limits must satisfy 0 < min <= max".to_owned(),
            ));
        }
        if !self.min_price_span.is_finite()
            || !self.max_price_span.is_finite()
            || self.min_price_span <= 0.0
            || self.max_price_span < self.min_price_span
        {
            return Err(ChartError::InvalidInput(
                "price span limits must be finite and satisfy 0 < min <= max".to_owned(),
            ));
        }
        if !self.wheel_zoom_base.is_finite() || self.wheel_zoom_base <= 1.0 {
            return Err(ChartError::InvalidInput(
                "wheel zoom base must be finite and > 1".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Widest visible time window: the full accepted timestamp range.
const MAX_VISIBLE_TIME_SPAN_MS: i64 = 2 * MAX_ABS_TIMESTAMP_MS;

/// Visible time/price window plus the plot extent it is drawn into.
///
/// Invariants: `time_end > time_start`, `price_max > price_min`, and both
/// time ends lie within `±MAX_ABS_TIMESTAMP_MS`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    time_start: i64,
    time_end: i64,
    price_min: f64,
    price_max: f64,
    plot: PlotSize,
}

impl Viewport {
    pub fn new(
        time_start: i64,
        time_end: i64,
        price_min: f64,
        price_max: f64,
        plot: PlotSize,
    ) -> ChartResult<Self> {
        let plot = plot.validate()?;
        if time_end <= time_start {
            return Err(ChartError::DegenerateRange(format!(
                "visible time range must have positive width, got [{time_start}, {time_end}]"
            )));
        }
        if time_start < -MAX_ABS_TIMESTAMP_MS || time_end > MAX_ABS_TIMESTAMP_MS {
            return Err(ChartError::InvalidInput(format!(
                "visible time range [{time_start}, {time_end}] exceeds +/-{MAX_ABS_TIMESTAMP_MS} ms"
            )));
        }
        if !price_min.is_finite() || !price_max.is_finite() || price_max <= price_min {
            return Err(ChartError::DegenerateRange(format!(
                "visible price range must be finite with positive width, got [{price_min}, {price_max}]"
            )));
        }

        Ok(Self {
            time_start,
            time_end,
            price_min,
            price_max,
            plot,
        })
    }

    /// Fits the viewport to the full data extent.
    ///
    /// A single timestamp widens to `min_time_span_ms` centred on it. A flat
    /// price series pads by `price_padding_ratio * |price|`, or by one unit
    /// when the price is zero.
    pub fn fit_to_data(
        bounds: DataBounds,
        plot: PlotSize,
        tuning: ViewportTuning,
    ) -> ChartResult<Self> {
        let (time_start, time_end) = if bounds.max_timestamp > bounds.min_timestamp {
            place_time_window(
                bounds.min_timestamp,
                bounds.max_timestamp.saturating_sub(bounds.min_timestamp),
            )
        } else {
            let half = (tuning.min_time_span_ms / 2).clamp(1, MAX_ABS_TIMESTAMP_MS);
            place_time_window(bounds.min_timestamp.saturating_sub(half), 2 * half)
        };

        let price_span = bounds.max_price - bounds.min_price;
        let padding = if price_span > 0.0 {
            price_span * tuning.price_padding_ratio
        } else {
            let magnitude = bounds.max_price.abs() * tuning.price_padding_ratio;
            if magnitude > 0.0 { magnitude } else { 1.0 }
        };
        let padding = padding.max(tuning.min_price_span / 2.0);

        Self::new(
            time_start,
            time_end,
            bounds.min_price - padding,
            bounds.max_price + padding,
            plot,
        )
    }

    #[must_use]
    pub fn time_range(self) -> (i64, i64) {
        (self.time_start, self.time_end)
    }

    #[must_use]
    pub fn price_range(self) -> (f64, f64) {
        (self.price_min, self.price_max)
    }

    #[must_use]
    pub fn time_span(self) -> i64 {
        self.time_end - self.time_start
    }

    #[must_use]
    pub fn price_span(self) -> f64 {
        self.price_max - self.price_min
    }

    #[must_use]
    pub fn plot(self) -> PlotSize {
        self.plot
    }

    /// Replaces the plot extent while keeping the visible ranges.
    pub fn set_plot(&mut self, plot: PlotSize) -> ChartResult<()> {
        self.plot = plot.validate()?;
        Ok(())
    }

    /// Shifts both ranges so the content follows a pointer drag of `(dx, dy)` pixels.
    ///
    /// Widths are preserved exactly: the time shift is a single integer applied
    /// to both ends. The time window stops at `±MAX_ABS_TIMESTAMP_MS`.
    pub fn pan(&mut self, dx_px: f64, dy_px: f64) -> ChartResult<()> {
        if !dx_px.is_finite() || !dy_px.is_finite() {
            return Err(ChartError::InvalidInput(
                "pan deltas must be finite".to_owned(),
            ));
        }

        let ms_per_px = self.time_span() as f64 / self.plot.width;
        let price_per_px = self.price_span() / self.plot.height;

        // Clamped in f64 so the cast and the addition below stay inside i64.
        let max_shift = (2 * MAX_VISIBLE_TIME_SPAN_MS) as f64;
        let time_shift = (-dx_px * ms_per_px).round().clamp(-max_shift, max_shift) as i64;
        let price_shift = dy_px * price_per_px;

        (self.time_start, self.time_end) =
            place_time_window(self.time_start + time_shift, self.time_span());
        let price_span = self.price_span();
        self.price_min += price_shift;
        self.price_max = self.price_min + price_span;

        trace!(dx_px, dy_px, time_shift, price_shift, "pan viewport");
        Ok(())
    }

    /// Scales the visible ranges by `factor`.
    ///
    /// The price range is rescaled around the price under `anchor_y_px`, which
    /// stays fixed on screen. The time range is rescaled around its midpoint.
    /// `factor > 1.0` widens the ranges (zoom out), `factor < 1.0` narrows them.
    pub fn zoom_by_factor(
        &mut self,
        factor: f64,
        anchor_y_px: f64,
        tuning: ViewportTuning,
    ) -> ChartResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidInput(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor_y_px.is_finite() {
            return Err(ChartError::InvalidInput(
                "zoom anchor must be finite".to_owned(),
            ));
        }

        let old_price_span = self.price_span();
        let new_price_span = clamp_zoom_span(
            old_price_span,
            factor,
            tuning.min_price_span,
            tuning.max_price_span,
        );
        let anchor_ratio = (self.plot.height - anchor_y_px) / self.plot.height;
        let anchor_price = self.price_min + anchor_ratio * old_price_span;
        self.price_min = anchor_price - anchor_ratio * new_price_span;
        self.price_max = self.price_min + new_price_span;

        let old_time_span = self.time_span() as f64;
        let new_time_span = clamp_zoom_span(
            old_time_span,
            factor,
            tuning.min_time_span_ms as f64,
            tuning.max_time_span_ms as f64,
        )
        .round()
        .clamp(1.0, MAX_VISIBLE_TIME_SPAN_MS as f64) as i64;
        let midpoint = self.time_start + self.time_span() / 2;
        (self.time_start, self.time_end) =
            place_time_window(midpoint - new_time_span / 2, new_time_span);

        trace!(
            factor,
            anchor_y_px, anchor_price, new_price_span, new_time_span, "zoom viewport"
        );
        Ok(())
    }
}

/// Positions a window of `span` millis at `start`, shifted as needed to stay
/// inside `±MAX_ABS_TIMESTAMP_MS`. Spans wider than that range are narrowed.
fn place_time_window(start: i64, span: i64) -> (i64, i64) {
    let span = span.clamp(1, MAX_VISIBLE_TIME_SPAN_MS);
    let start = start.clamp(-MAX_ABS_TIMESTAMP_MS, MAX_ABS_TIMESTAMP_MS - span);
    (start, start + span)
}

/// Applies `factor` to `span`, keeping the result inside `[min_span, max_span]`.
///
/// A span that already sits beyond a limit is never pushed further past it,
/// so zooming stays monotonic after a fit to unusually wide data.
fn clamp_zoom_span(span: f64, factor: f64, min_span: f64, max_span: f64) -> f64 {
    let target = span * factor;
    if factor >= 1.0 {
        target.min(max_span.max(span))
    } else {
        target.max(min_span.min(span))
    }
}
