use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};

use super::ChartEngine;

impl ChartEngine {
    /// Pans the viewport so the content follows a drag of `(dx, dy)` pixels.
    ///
    /// No-op while uninitialized. Panning past the data is allowed.
    pub fn pan(&mut self, dx: f64, dy: f64) -> ChartResult<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(ChartError::InvalidInput(
                "pan deltas must be finite".to_owned(),
            ));
        }
        let Some(viewport) = self.viewport.as_mut() else {
            trace!("pan ignored before first ingestion");
            return Ok(());
        };
        viewport.pan(dx, dy)
    }

    /// Zooms around the price under pixel row `anchor_y`.
    ///
    /// Negative `wheel_delta` zooms in, positive zooms out. The price under
    /// `anchor_y` stays put; the time range scales around its midpoint.
    pub fn zoom(&mut self, wheel_delta: f64, anchor_y: f64) -> ChartResult<()> {
        if !anchor_y.is_finite() {
            return Err(ChartError::InvalidInput(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        let Some(factor) =
            resolve_wheel_zoom_factor(wheel_delta, self.config.viewport_tuning.wheel_zoom_base)?
        else {
            return Ok(());
        };
        let tuning = self.config.viewport_tuning;
        let Some(viewport) = self.viewport.as_mut() else {
            trace!("zoom ignored before first ingestion");
            return Ok(());
        };
        viewport.zoom_by_factor(factor, anchor_y, tuning)
    }

    /// Re-fits the viewport to all stored data. No-op on an empty store.
    pub fn reset_view(&mut self) {
        match self.fit_viewport() {
            Ok(viewport) => {
                debug!(?viewport, "reset view to data");
                self.viewport = Some(viewport);
            }
            Err(err) => trace!(error = %err, "reset view skipped"),
        }
    }
}

/// Maps a wheel delta onto a span multiplier `base ^ delta`.
///
/// Returns `None` for a zero delta. The factor is kept strictly positive and
/// finite; span limits are enforced by the viewport.
pub(super) fn resolve_wheel_zoom_factor(wheel_delta: f64, base: f64) -> ChartResult<Option<f64>> {
    if !wheel_delta.is_finite() {
        return Err(ChartError::InvalidInput(
            "wheel delta must be finite".to_owned(),
        ));
    }
    if wheel_delta == 0.0 {
        return Ok(None);
    }

    let factor = base.powf(wheel_delta);
    if factor.is_nan() {
        return Err(ChartError::InvalidInput(
            "computed wheel zoom factor must not be NaN".to_owned(),
        ));
    }
    Ok(Some(factor.clamp(f64::MIN_POSITIVE, f64::MAX)))
}

#[cfg(test)]
mod tests {
    use super::resolve_wheel_zoom_factor;

    #[test]
    fn zero_wheel_delta_returns_none() {
        let factor = resolve_wheel_zoom_factor(0.0, 1.001).expect("factor");
        assert!(factor.is_none());
    }

    #[test]
    fn sign_selects_zoom_direction() {
        let zoom_in = resolve_wheel_zoom_factor(-120.0, 1.001)
            .expect("factor")
            .expect("some");
        let zoom_out = resolve_wheel_zoom_factor(120.0, 1.001)
            .expect("factor")
            .expect("some");
        assert!(zoom_in < 1.0);
        assert!(zoom_out > 1.0);
        assert!((zoom_in * zoom_out - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn extreme_delta_stays_positive_and_finite() {
        let tiny = resolve_wheel_zoom_factor(-1e9, 1.001)
            .expect("factor")
            .expect("some");
        let huge = resolve_wheel_zoom_factor(1e9, 1.001)
            .expect("factor")
            .expect("some");
        assert!(tiny > 0.0);
        assert!(huge.is_finite());
    }

    #[test]
    fn non_finite_delta_is_rejected() {
        assert!(resolve_wheel_zoom_factor(f64::NAN, 1.001).is_err());
        assert!(resolve_wheel_zoom_factor(f64::INFINITY, 1.001).is_err());
    }
}
