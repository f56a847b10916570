mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, PriceGridLine, TimeGridLine};

use crate::error::ChartResult;

/// Contract implemented by the host's drawing layer.
///
/// Drawing layers receive a fully materialized `RenderFrame`, so painting
/// code stays isolated from viewport and tick logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
