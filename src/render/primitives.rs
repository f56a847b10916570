use serde::{Deserialize, Serialize};

use crate::core::VolumeBarColor;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl From<VolumeBarColor> for Color {
    fn from(color: VolumeBarColor) -> Self {
        match color {
            VolumeBarColor::Bullish => Self::rgba(33.0 / 255.0, 150.0 / 255.0, 243.0 / 255.0, 0.5),
            VolumeBarColor::Bearish => Self::rgba(244.0 / 255.0, 67.0 / 255.0, 54.0 / 255.0, 0.5),
        }
    }
}

/// Horizontal price grid line. `label` is set for major lines only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceGridLine {
    pub y: f64,
    pub price: f64,
    pub is_major: bool,
    pub label: Option<String>,
}

/// Vertical time grid line. `label` is set for major lines only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGridLine {
    pub x: f64,
    pub timestamp: i64,
    pub is_major: bool,
    pub label: Option<String>,
}
