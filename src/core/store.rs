use tracing::trace;

use crate::core::{DataBounds, Observation};
use crate::error::{ChartError, ChartResult};

/// Append-only observation sequence kept non-decreasing by timestamp.
///
/// Out-of-order input is inserted at its sorted position. Observations with
/// equal timestamps keep their ingestion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesStore {
    observations: Vec<Observation>,
    bounds: Option<DataBounds>,
}

impl TimeSeriesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Inserts one observation, preserving timestamp order.
    pub fn append(&mut self, observation: Observation) -> ChartResult<()> {
        observation.validate()?;

        match self.observations.last() {
            Some(last) if observation.timestamp < last.timestamp => {
                let index = self
                    .observations
                    .partition_point(|stored| stored.timestamp <= observation.timestamp);
                trace!(
                    timestamp = observation.timestamp,
                    index, "insert out-of-order observation"
                );
                self.observations.insert(index, observation);
            }
            _ => self.observations.push(observation),
        }

        self.include_in_bounds(&observation);
        Ok(())
    }

    /// Merges a batch into the store.
    ///
    /// Every entry is validated before the store is touched, so a failing
    /// batch leaves the store unchanged. Cost is one sort of the batch plus
    /// one linear merge.
    pub fn append_batch(&mut self, mut batch: Vec<Observation>) -> ChartResult<()> {
        for (index, observation) in batch.iter().enumerate() {
            observation
                .validate()
                .map_err(|err| ChartError::MalformedBatchEntry {
                    index,
                    reason: err.to_string(),
                })?;
        }
        if batch.is_empty() {
            return Ok(());
        }

        batch.sort_by_key(|observation| observation.timestamp);
        for observation in &batch {
            self.include_in_bounds(observation);
        }

        let appends_in_order = self
            .observations
            .last()
            .is_none_or(|last| batch[0].timestamp >= last.timestamp);
        if appends_in_order {
            self.observations.extend(batch);
            return Ok(());
        }

        trace!(
            existing = self.observations.len(),
            incoming = batch.len(),
            "merge out-of-order batch"
        );
        let existing = std::mem::take(&mut self.observations);
        self.observations = merge_sorted(existing, batch);
        Ok(())
    }

    /// Returns observations with `timestamp` in `[time_start, time_end]`.
    #[must_use]
    pub fn visible_slice(&self, time_start: i64, time_end: i64) -> &[Observation] {
        if time_start > time_end {
            return &[];
        }
        let lower = self
            .observations
            .partition_point(|observation| observation.timestamp < time_start);
        let upper = self
            .observations
            .partition_point(|observation| observation.timestamp <= time_end);
        &self.observations[lower..upper]
    }

    pub fn bounds(&self) -> ChartResult<DataBounds> {
        self.bounds.ok_or(ChartError::EmptyStore)
    }

    fn include_in_bounds(&mut self, observation: &Observation) {
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.including(observation),
            None => DataBounds::from_observation(observation),
        });
    }
}

/// Linear merge of two timestamp-sorted runs. Ties keep `existing` first.
fn merge_sorted(existing: Vec<Observation>, incoming: Vec<Observation>) -> Vec<Observation> {
    let mut merged = Vec::with_capacity(existing.len() + incoming.len());
    let mut existing = existing.into_iter().peekable();
    let mut incoming = incoming.into_iter().peekable();

    loop {
        let take_existing = match (existing.peek(), incoming.peek()) {
            (Some(left), Some(right)) => left.timestamp <= right.timestamp,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_existing {
            existing.next()
        } else {
            incoming.next()
        };
        merged.extend(next);
    }

    merged
}
