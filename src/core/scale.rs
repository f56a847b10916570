use crate::error::{ChartError, ChartResult};

/// One-dimensional linear mapping from a data domain onto `[0, extent_px]`.
///
/// With `inverted` set, the domain start maps to `extent_px` instead of zero,
/// matching screen Y coordinates that grow downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    extent_px: f64,
    inverted: bool,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64, extent_px: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start >= domain_end {
            return Err(ChartError::DegenerateRange(format!(
                "scale domain must be finite with start < end, got [{domain_start}, {domain_end}]"
            )));
        }
        if !extent_px.is_finite() || extent_px <= 0.0 {
            return Err(ChartError::InvalidInput(
                "scale extent must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            extent_px,
            inverted: false,
        })
    }

    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Domain units covered by one pixel.
    #[must_use]
    pub fn units_per_pixel(self) -> f64 {
        (self.domain_end - self.domain_start) / self.extent_px
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        let offset = normalized * self.extent_px;
        if self.inverted {
            self.extent_px - offset
        } else {
            offset
        }
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        let offset = if self.inverted {
            self.extent_px - pixel
        } else {
            pixel
        };
        self.domain_start + offset / self.extent_px * (self.domain_end - self.domain_start)
    }
}
