use serde::{Deserialize, Serialize};

use crate::core::Observation;
use crate::error::{ChartError, ChartResult};

/// One element of a host-supplied ingestion batch.
///
/// Fields are optional so a payload with missing values still deserializes
/// and can be reported as a malformed entry with its index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchEntry {
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl BatchEntry {
    #[must_use]
    pub fn new(timestamp: i64, price: f64, volume: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            price: Some(price),
            volume: Some(volume),
        }
    }

    /// Converts the entry into a validated observation.
    pub fn to_observation(self, index: usize) -> ChartResult<Observation> {
        let malformed = |reason: String| ChartError::MalformedBatchEntry { index, reason };

        let timestamp = self
            .timestamp
            .ok_or_else(|| malformed("missing field `timestamp`".to_owned()))?;
        let price = self
            .price
            .ok_or_else(|| malformed("missing field `price`".to_owned()))?;
        let volume = self
            .volume
            .ok_or_else(|| malformed("missing field `volume`".to_owned()))?;

        Observation::new(timestamp, price, volume).map_err(|err| malformed(err.to_string()))
    }
}

impl From<Observation> for BatchEntry {
    fn from(observation: Observation) -> Self {
        Self::new(observation.timestamp, observation.price, observation.volume)
    }
}

/// Validates a whole batch, failing on the first malformed entry.
pub fn validate_batch(entries: &[BatchEntry]) -> ChartResult<Vec<Observation>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| entry.to_observation(index))
        .collect()
}

/// Parses a JSON array of `{timestamp, price, volume}` objects.
///
/// Non-numeric values fail parsing as a whole; missing fields surface later
/// as `MalformedBatchEntry` from `validate_batch`.
pub fn parse_batch_json(input: &str) -> ChartResult<Vec<BatchEntry>> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse batch json payload: {e}")))
}
