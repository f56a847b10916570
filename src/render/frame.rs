use serde::{Deserialize, Serialize};

use crate::core::{LinePoint, PlotSize, VolumeBar};
use crate::error::{ChartError, ChartResult};
use crate::render::{PriceGridLine, TimeGridLine};

/// All primitives for one paint of the chart.
///
/// Frames are built on demand and carry no identity beyond the call that
/// produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub plot: PlotSize,
    pub line_points: Vec<LinePoint>,
    pub price_grid: Vec<PriceGridLine>,
    pub time_grid: Vec<TimeGridLine>,
    pub volume_bars: Vec<VolumeBar>,
}

impl RenderFrame {
    #[must_use]
    pub fn empty(plot: PlotSize) -> Self {
        Self {
            plot,
            line_points: Vec::new(),
            price_grid: Vec::new(),
            time_grid: Vec::new(),
            volume_bars: Vec::new(),
        }
    }

    /// `true` when the drawing layer has enough points to stroke a line and fill.
    #[must_use]
    pub fn has_drawable_line(&self) -> bool {
        self.line_points.len() >= 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_points.is_empty()
            && self.price_grid.is_empty()
            && self.time_grid.is_empty()
            && self.volume_bars.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.plot.validate()?;

        for point in &self.line_points {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(ChartError::InvalidData(
                    "line point coordinates must be finite".to_owned(),
                ));
            }
        }
        for line in &self.price_grid {
            if !line.y.is_finite() || line.is_major != line.label.is_some() {
                return Err(ChartError::InvalidData(
                    "price grid line must be finite and labelled iff major".to_owned(),
                ));
            }
        }
        for line in &self.time_grid {
            if !line.x.is_finite() || line.is_major != line.label.is_some() {
                return Err(ChartError::InvalidData(
                    "time grid line must be finite and labelled iff major".to_owned(),
                ));
            }
        }
        for bar in &self.volume_bars {
            if !bar.x.is_finite()
                || !bar.y.is_finite()
                || !bar.width.is_finite()
                || !bar.height.is_finite()
                || bar.width <= 0.0
                || bar.height < 0.0
            {
                return Err(ChartError::InvalidData(
                    "volume bar geometry must be finite with positive width".to_owned(),
                ));
            }
        }

        Ok(())
    }
}
