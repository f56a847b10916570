use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Renderer that draws nothing and records what it was handed.
///
/// Frames are validated first, so a frame with non-finite geometry or a
/// labelled minor grid line is rejected here instead of reaching a host.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_point_count: usize,
    /// Price and time grid lines combined.
    pub last_grid_line_count: usize,
    pub last_volume_bar_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_point_count = frame.line_points.len();
        self.last_grid_line_count = frame.price_grid.len() + frame.time_grid.len();
        self.last_volume_bar_count = frame.volume_bars.len();
        Ok(())
    }
}
