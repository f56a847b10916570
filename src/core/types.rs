use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel dimensions of the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSize {
    pub width: f64,
    pub height: f64,
}

impl PlotSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidPlotSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Largest accepted `|timestamp|` in epoch millis (2^53, about 285k years).
///
/// Timestamps are projected through `f64`, which represents every integer
/// only up to this bound. Visible windows stay inside `±MAX_ABS_TIMESTAMP_MS`
/// so span arithmetic never leaves `i64`.
pub const MAX_ABS_TIMESTAMP_MS: i64 = 1 << 53;

/// One `(timestamp, price, volume)` sample. Timestamps are epoch millis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: i64,
    pub price: f64,
    pub volume: f64,
}

impl Observation {
    /// Builds a validated observation.
    ///
    /// Invariants:
    /// - `|timestamp| <= MAX_ABS_TIMESTAMP_MS`
    /// - `price` is finite
    /// - `volume` is finite and `>= 0`
    pub fn new(timestamp: i64, price: f64, volume: f64) -> ChartResult<Self> {
        let observation = Self {
            timestamp,
            price,
            volume,
        };
        observation.validate()?;
        Ok(observation)
    }

    /// Builds an observation from exchange-style typed values.
    ///
    /// Sub-millisecond precision in `time` is truncated.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        price: Decimal,
        volume: Decimal,
    ) -> ChartResult<Self> {
        let to_f64 = |value: Decimal, field: &str| {
            value.to_f64().ok_or_else(|| {
                ChartError::InvalidObservation(format!("{field} {value} does not fit in f64"))
            })
        };
        Self::new(
            time.timestamp_millis(),
            to_f64(price, "price")?,
            to_f64(volume, "volume")?,
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.timestamp.unsigned_abs() > MAX_ABS_TIMESTAMP_MS.unsigned_abs() {
            return Err(ChartError::InvalidObservation(format!(
                "timestamp {} is outside +/-{MAX_ABS_TIMESTAMP_MS} ms",
                self.timestamp
            )));
        }
        if !self.price.is_finite() {
            return Err(ChartError::InvalidObservation(
                "price must be finite".to_owned(),
            ));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(ChartError::InvalidObservation(
                "volume must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Extent of all stored observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataBounds {
    pub min_timestamp: i64,
    pub max_timestamp: i64,
    pub min_price: f64,
    pub max_price: f64,
}

impl DataBounds {
    #[must_use]
    pub fn from_observation(observation: &Observation) -> Self {
        Self {
            min_timestamp: observation.timestamp,
            max_timestamp: observation.timestamp,
            min_price: observation.price,
            max_price: observation.price,
        }
    }

    #[must_use]
    pub fn including(self, observation: &Observation) -> Self {
        Self {
            min_timestamp: self.min_timestamp.min(observation.timestamp),
            max_timestamp: self.max_timestamp.max(observation.timestamp),
            min_price: self.min_price.min(observation.price),
            max_price: self.max_price.max(observation.price),
        }
    }
}
