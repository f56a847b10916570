use serde::{Deserialize, Serialize};

use crate::core::{GridConfig, PlotSize, ViewportTuning, VolumeBarStyle};
use crate::error::{ChartError, ChartResult};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Omitted sections fall back to
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub plot: PlotSize,
    #[serde(default)]
    pub viewport_tuning: ViewportTuning,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub volume_bars: VolumeBarStyle,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(plot_width: f64, plot_height: f64) -> Self {
        Self {
            plot: PlotSize::new(plot_width, plot_height),
            viewport_tuning: ViewportTuning::default(),
            grid: GridConfig::default(),
            volume_bars: VolumeBarStyle::default(),
        }
    }

    #[must_use]
    pub fn with_viewport_tuning(mut self, tuning: ViewportTuning) -> Self {
        self.viewport_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_volume_bars(mut self, style: VolumeBarStyle) -> Self {
        self.volume_bars = style;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.plot.validate()?;
        self.viewport_tuning.validate()?;
        self.grid.validate()?;
        self.volume_bars.validate()?;
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()
    }
}
