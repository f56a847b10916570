use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid plot size: width={width}, height={height}")]
    InvalidPlotSize { width: f64, height: f64 },

    /// Raised by store bounds queries on an empty store. The engine recovers
    /// from it by leaving the viewport unset.
    #[error("time series store is empty")]
    EmptyStore,

    /// Raised when a range collapses below its minimum span. The engine
    /// recovers from it by clamping or by returning empty primitives.
    #[error("degenerate range: {0}")]
    DegenerateRange(String),

    #[error("malformed batch entry at index {index}: {reason}")]
    MalformedBatchEntry { index: usize, reason: String },

    #[error("invalid observation: {0}")]
    InvalidObservation(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("chart engine lock poisoned")]
    LockPoisoned,
}
