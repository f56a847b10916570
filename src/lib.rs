//! tickchart-rs: headless financial time-series charting engine.
//!
//! The engine stores `(timestamp, price, volume)` observations, keeps a
//! pannable/zoomable viewport, and emits render-ready primitives (line
//! points, price/time grid lines, volume bars). Painting them is left to the
//! host's drawing layer.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{BatchEntry, ChartEngine, ChartEngineConfig, EngineState, SharedChartEngine};
pub use error::{ChartError, ChartResult};
