use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{Observation, Transform};

/// Projected price polyline vertex in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
    /// Source price, kept for tooltips and fill baselines.
    pub price: f64,
}

/// Projects one point per observation, preserving slice order.
///
/// Slices shorter than two observations are returned as-is; the drawing
/// layer decides whether a line or fill can be painted.
#[must_use]
pub fn build_line_points(slice: &[Observation], transform: Transform) -> Vec<LinePoint> {
    let project = |observation: &Observation| LinePoint {
        x: transform.time_to_x(observation.timestamp),
        y: transform.price_to_y(observation.price),
        price: observation.price,
    };

    #[cfg(feature = "parallel-projection")]
    {
        slice.par_iter().map(project).collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        slice.iter().map(project).collect()
    }
}
