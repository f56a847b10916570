pub mod axis_labels;
pub mod grid;
pub mod line_points;
pub mod scale;
pub mod store;
pub mod transform;
pub mod types;
pub mod viewport;
pub mod volume_bars;

pub use axis_labels::{format_price_label, format_time_label, time_label_pattern};
pub use grid::{
    GridConfig, GridLine, MAX_TICKS_PER_AXIS, PriceGrid, TIME_STEP_PALETTE, TimeGrid, TimeStep,
    nice_price_step, nice_time_step, price_grid, time_grid,
};
pub use line_points::{LinePoint, build_line_points};
pub use scale::LinearScale;
pub use store::TimeSeriesStore;
pub use transform::Transform;
pub use types::{DataBounds, MAX_ABS_TIMESTAMP_MS, Observation, PlotSize};
pub use viewport::{Viewport, ViewportTuning};
pub use volume_bars::{VolumeBar, VolumeBarColor, VolumeBarStyle, build_volume_bars};
