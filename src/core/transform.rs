use crate::core::{LinearScale, PlotSize, Viewport};
use crate::error::ChartResult;

/// Data-space to pixel-space mapping derived from one `Viewport`.
///
/// `x(t) = (t - time_start) / time_span * width`
/// `y(p) = height - (p - price_min) / price_span * height`
///
/// Built fresh for every primitive request and never stored by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    time: LinearScale,
    price: LinearScale,
    plot: PlotSize,
}

impl Transform {
    pub fn from_viewport(viewport: &Viewport) -> ChartResult<Self> {
        let plot = viewport.plot();
        let (time_start, time_end) = viewport.time_range();
        let (price_min, price_max) = viewport.price_range();

        Ok(Self {
            time: LinearScale::new(time_start as f64, time_end as f64, plot.width)?,
            price: LinearScale::new(price_min, price_max, plot.height)?.inverted(),
            plot,
        })
    }

    #[must_use]
    pub fn plot(self) -> PlotSize {
        self.plot
    }

    #[must_use]
    pub fn time_to_x(self, timestamp: i64) -> f64 {
        self.time.domain_to_pixel(timestamp as f64)
    }

    #[must_use]
    pub fn price_to_y(self, price: f64) -> f64 {
        self.price.domain_to_pixel(price)
    }

    /// Inverse of `time_to_x`, in fractional millis.
    #[must_use]
    pub fn x_to_time(self, x: f64) -> f64 {
        self.time.pixel_to_domain(x)
    }

    #[must_use]
    pub fn y_to_price(self, y: f64) -> f64 {
        self.price.pixel_to_domain(y)
    }

    #[must_use]
    pub fn ms_per_px(self) -> f64 {
        self.time.units_per_pixel()
    }

    #[must_use]
    pub fn price_per_px(self) -> f64 {
        self.price.units_per_pixel()
    }

    /// Visible time domain as `f64` millis.
    #[must_use]
    pub fn time_domain(self) -> (f64, f64) {
        self.time.domain()
    }

    #[must_use]
    pub fn price_domain(self) -> (f64, f64) {
        self.price.domain()
    }
}
