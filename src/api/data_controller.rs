use tracing::{debug, trace, warn};

use crate::core::{Observation, Viewport};
use crate::error::{ChartError, ChartResult};

use super::ChartEngine;
use super::batch::{BatchEntry, parse_batch_json, validate_batch};

impl ChartEngine {
    /// Ingests one observation.
    ///
    /// The first successful ingestion fits the viewport to the data. Later
    /// points keep the current window, so a streaming caller starting from an
    /// empty engine should call [`ChartEngine::reset_view`] once the first few
    /// points have arrived, or the view stays on the first point's window.
    pub fn add_data(&mut self, timestamp: i64, price: f64, volume: f64) -> ChartResult<()> {
        let observation = Observation::new(timestamp, price, volume)?;
        self.store.append(observation)?;
        trace!(
            timestamp,
            price,
            volume,
            count = self.store.len(),
            "append observation"
        );
        self.ensure_viewport();
        Ok(())
    }

    /// Ingests a batch atomically: any malformed entry rejects the whole call
    /// and leaves the store unchanged.
    pub fn add_data_batch(&mut self, entries: Vec<BatchEntry>) -> ChartResult<()> {
        let observations = validate_batch(&entries)?;
        self.add_observations(observations)
    }

    /// Ingests already-typed observations with the same atomicity as `add_data_batch`.
    pub fn add_observations(&mut self, observations: Vec<Observation>) -> ChartResult<()> {
        let incoming = observations.len();
        self.store.append_batch(observations)?;
        debug!(incoming, count = self.store.len(), "append observation batch");
        self.ensure_viewport();
        Ok(())
    }

    /// Ingests a JSON array of `{timestamp, price, volume}` objects.
    pub fn add_data_batch_json(&mut self, input: &str) -> ChartResult<()> {
        let entries = parse_batch_json(input)?;
        self.add_data_batch(entries)
    }

    /// Establishes the viewport after the first ingestion. Later ingestion
    /// leaves the viewport alone so user pan/zoom is not discarded.
    fn ensure_viewport(&mut self) {
        if self.viewport.is_some() {
            return;
        }
        match self.fit_viewport() {
            Ok(viewport) => {
                debug!(?viewport, "chart engine ready");
                self.viewport = Some(viewport);
            }
            Err(ChartError::EmptyStore) => {}
            Err(err) => warn!(error = %err, "failed to fit viewport to data"),
        }
    }

    pub(super) fn fit_viewport(&self) -> ChartResult<Viewport> {
        let bounds = self.store.bounds()?;
        Viewport::fit_to_data(bounds, self.config.plot, self.config.viewport_tuning)
    }
}
