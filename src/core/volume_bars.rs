use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{Observation, Transform};
use crate::error::{ChartError, ChartResult};

const MIN_BAR_WIDTH_PX: f64 = 1.0;

/// Direction of a volume bar relative to the preceding observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeBarColor {
    Bullish,
    Bearish,
}

impl VolumeBarColor {
    /// CSS color string handed to canvas-style drawing layers.
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Bullish => "rgba(33, 150, 243, 0.5)",
            Self::Bearish => "rgba(244, 67, 54, 0.5)",
        }
    }
}

/// Volume bar geometry. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: VolumeBarColor,
}

/// Layout of the volume band at the bottom of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeBarStyle {
    /// Share of the plot height the tallest visible bar occupies.
    pub band_ratio: f64,
    /// Gap removed from each bar's slot width.
    pub gutter_px: f64,
}

impl Default for VolumeBarStyle {
    fn default() -> Self {
        Self {
            band_ratio: 0.30,
            gutter_px: 1.0,
        }
    }
}

impl VolumeBarStyle {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.band_ratio.is_finite() || self.band_ratio <= 0.0 || self.band_ratio > 1.0 {
            return Err(ChartError::InvalidInput(
                "volume band ratio must be finite and in (0, 1]".to_owned(),
            ));
        }
        if !self.gutter_px.is_finite() || self.gutter_px < 0.0 {
            return Err(ChartError::InvalidInput(
                "volume gutter must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Projects one bar per observation into the bottom band of the plot.
///
/// Heights are proportional to `volume / max_visible_volume`. A bar is
/// bullish when its price is `>=` the previous observation's price; the
/// first bar of the slice is bullish.
#[must_use]
pub fn build_volume_bars(
    slice: &[Observation],
    transform: Transform,
    style: VolumeBarStyle,
) -> Vec<VolumeBar> {
    if slice.is_empty() {
        return Vec::new();
    }

    let plot = transform.plot();
    let max_volume = slice
        .iter()
        .map(|observation| observation.volume)
        .fold(0.0, f64::max);
    let band_height = plot.height * style.band_ratio;
    let width = (plot.width / slice.len() as f64 - style.gutter_px).max(MIN_BAR_WIDTH_PX);

    let project = |index: usize| {
        let observation = slice[index];
        let height = if max_volume > 0.0 {
            observation.volume / max_volume * band_height
        } else {
            0.0
        };
        let color = match index.checked_sub(1).map(|prev| slice[prev].price) {
            Some(previous) if observation.price < previous => VolumeBarColor::Bearish,
            _ => VolumeBarColor::Bullish,
        };
        VolumeBar {
            x: transform.time_to_x(observation.timestamp) - width / 2.0,
            y: plot.height - height,
            width,
            height,
            color,
        }
    };

    #[cfg(feature = "parallel-projection")]
    {
        (0..slice.len()).into_par_iter().map(project).collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        (0..slice.len()).map(project).collect()
    }
}
