use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Observation, PlotSize, TimeSeriesStore, Transform, Viewport};
use crate::error::ChartResult;

use super::ChartEngineConfig;

/// Lifecycle of an engine. `Ready` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No observation ingested yet; viewport unset, primitives empty.
    Uninitialized,
    /// Viewport established from the data.
    Ready,
}

/// Main facade consumed by host drawing layers.
///
/// `ChartEngine` owns the observation store and the viewport. Every
/// primitive request derives a fresh `Transform` from the current viewport.
#[derive(Debug, Clone)]
pub struct ChartEngine {
    pub(super) config: ChartEngineConfig,
    pub(super) store: TimeSeriesStore,
    pub(super) viewport: Option<Viewport>,
}

impl ChartEngine {
    /// Creates an engine for a plot of the given pixel dimensions.
    pub fn new(plot_width: f64, plot_height: f64) -> ChartResult<Self> {
        Self::with_config(ChartEngineConfig::new(plot_width, plot_height))
    }

    pub fn with_config(config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        debug!(
            width = config.plot.width,
            height = config.plot.height,
            "create chart engine"
        );
        Ok(Self {
            config,
            store: TimeSeriesStore::new(),
            viewport: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.config
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.viewport.is_some() {
            EngineState::Ready
        } else {
            EngineState::Uninitialized
        }
    }

    #[must_use]
    pub fn plot(&self) -> PlotSize {
        self.config.plot
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        self.store.observations()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Updates the plot dimensions, keeping the visible ranges.
    pub fn resize(&mut self, plot_width: f64, plot_height: f64) -> ChartResult<()> {
        let plot = PlotSize::new(plot_width, plot_height).validate()?;
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.set_plot(plot)?;
        }
        self.config.plot = plot;
        debug!(width = plot_width, height = plot_height, "resize plot");
        Ok(())
    }

    /// Transform for the current viewport, or `None` while uninitialized.
    #[must_use]
    pub fn transform(&self) -> Option<Transform> {
        let viewport = self.viewport.as_ref()?;
        match Transform::from_viewport(viewport) {
            Ok(transform) => Some(transform),
            Err(err) => {
                warn!(error = %err, "skipping primitives for degenerate viewport");
                None
            }
        }
    }

    /// Price under the pixel row `y`.
    #[must_use]
    pub fn price_at(&self, y: f64) -> Option<f64> {
        self.transform().map(|transform| transform.y_to_price(y))
    }

    /// Timestamp (fractional millis) under the pixel column `x`.
    #[must_use]
    pub fn time_at(&self, x: f64) -> Option<f64> {
        self.transform().map(|transform| transform.x_to_time(x))
    }

    #[must_use]
    pub fn y_for_price(&self, price: f64) -> Option<f64> {
        self.transform().map(|transform| transform.price_to_y(price))
    }

    #[must_use]
    pub fn x_for_time(&self, timestamp: i64) -> Option<f64> {
        self.transform().map(|transform| transform.time_to_x(timestamp))
    }
}
