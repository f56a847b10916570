use tracing::trace;

use crate::core::{
    LinePoint, Observation, VolumeBar, build_line_points, build_volume_bars,
    format_price_label, format_time_label, price_grid, time_grid,
};
use crate::error::ChartResult;
use crate::render::{PriceGridLine, RenderFrame, Renderer, TimeGridLine};

use super::ChartEngine;

impl ChartEngine {
    /// Observations inside the visible time range, in timestamp order.
    #[must_use]
    pub fn visible_observations(&self) -> &[Observation] {
        match self.viewport {
            Some(viewport) => {
                let (start, end) = viewport.time_range();
                self.store.visible_slice(start, end)
            }
            None => &[],
        }
    }

    /// One projected point per visible observation, in ascending x.
    #[must_use]
    pub fn line_points(&self) -> Vec<LinePoint> {
        let Some(transform) = self.transform() else {
            return Vec::new();
        };
        let points = build_line_points(self.visible_observations(), transform);
        trace!(count = points.len(), "build line points");
        points
    }

    /// Horizontal grid lines for the visible price range. Majors carry a label.
    #[must_use]
    pub fn price_grid(&self) -> Vec<PriceGridLine> {
        let Some(transform) = self.transform() else {
            return Vec::new();
        };
        let grid = price_grid(transform, self.config.grid);
        trace!(step = grid.step, count = grid.lines.len(), "build price grid");
        grid.lines
            .into_iter()
            .map(|line| PriceGridLine {
                y: line.position_px,
                price: line.value,
                is_major: line.is_major,
                label: line
                    .is_major
                    .then(|| format_price_label(line.value, grid.step)),
            })
            .collect()
    }

    /// Vertical grid lines for the visible time range. Majors carry a label.
    #[must_use]
    pub fn time_grid(&self) -> Vec<TimeGridLine> {
        let Some(transform) = self.transform() else {
            return Vec::new();
        };
        let offset_minutes = self.config.grid.utc_offset_minutes;
        let grid = time_grid(transform, self.config.grid);
        trace!(
            step_ms = grid.step.millis,
            count = grid.lines.len(),
            "build time grid"
        );
        grid.lines
            .into_iter()
            .map(|line| TimeGridLine {
                x: line.position_px,
                timestamp: line.value,
                is_major: line.is_major,
                label: line
                    .is_major
                    .then(|| format_time_label(line.value, grid.step, offset_minutes)),
            })
            .collect()
    }

    /// One volume bar per visible observation in the bottom band of the plot.
    #[must_use]
    pub fn volume_bars(&self) -> Vec<VolumeBar> {
        let Some(transform) = self.transform() else {
            return Vec::new();
        };
        let bars = build_volume_bars(
            self.visible_observations(),
            transform,
            self.config.volume_bars,
        );
        trace!(count = bars.len(), "build volume bars");
        bars
    }

    /// Builds all four primitive collections for the current viewport.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::empty(self.config.plot);
        if self.transform().is_none() {
            return frame;
        }
        frame.line_points = self.line_points();
        frame.price_grid = self.price_grid();
        frame.time_grid = self.time_grid();
        frame.volume_bars = self.volume_bars();
        frame
    }

    /// Hands a freshly built frame to the host's drawing layer.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        renderer.render(&self.frame())
    }
}
