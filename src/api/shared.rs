use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::{LinePoint, VolumeBar};
use crate::error::{ChartError, ChartResult};
use crate::render::{PriceGridLine, RenderFrame, TimeGridLine};

use super::{BatchEntry, ChartEngine};

/// Cloneable handle for hosts that drive one engine from several threads.
///
/// Every call holds a single exclusive lock for its whole duration, so no
/// caller observes a viewport halfway through a pan or zoom.
#[derive(Debug, Clone)]
pub struct SharedChartEngine {
    inner: Arc<Mutex<ChartEngine>>,
}

impl SharedChartEngine {
    #[must_use]
    pub fn new(engine: ChartEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> ChartResult<MutexGuard<'_, ChartEngine>> {
        self.inner.lock().map_err(|_| ChartError::LockPoisoned)
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with_engine<T>(&self, f: impl FnOnce(&mut ChartEngine) -> T) -> ChartResult<T> {
        let mut engine = self.lock()?;
        Ok(f(&mut engine))
    }

    pub fn add_data(&self, timestamp: i64, price: f64, volume: f64) -> ChartResult<()> {
        self.lock()?.add_data(timestamp, price, volume)
    }

    pub fn add_data_batch(&self, entries: Vec<BatchEntry>) -> ChartResult<()> {
        self.lock()?.add_data_batch(entries)
    }

    pub fn pan(&self, dx: f64, dy: f64) -> ChartResult<()> {
        self.lock()?.pan(dx, dy)
    }

    pub fn zoom(&self, wheel_delta: f64, anchor_y: f64) -> ChartResult<()> {
        self.lock()?.zoom(wheel_delta, anchor_y)
    }

    pub fn reset_view(&self) -> ChartResult<()> {
        self.lock()?.reset_view();
        Ok(())
    }

    pub fn line_points(&self) -> ChartResult<Vec<LinePoint>> {
        Ok(self.lock()?.line_points())
    }

    pub fn price_grid(&self) -> ChartResult<Vec<PriceGridLine>> {
        Ok(self.lock()?.price_grid())
    }

    pub fn time_grid(&self) -> ChartResult<Vec<TimeGridLine>> {
        Ok(self.lock()?.time_grid())
    }

    pub fn volume_bars(&self) -> ChartResult<Vec<VolumeBar>> {
        Ok(self.lock()?.volume_bars())
    }

    pub fn frame(&self) -> ChartResult<RenderFrame> {
        Ok(self.lock()?.frame())
    }
}
