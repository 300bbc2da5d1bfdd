use std::ops::Deref;

use ndarray::Axis;
use tracing::debug;

use crate::error::{CorrMapError, Result};
use crate::volume::Volume;

/// One value per frame, in frame order. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeTrace {
    values: Vec<f32>,
}

impl TimeTrace {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.values
    }
}

impl From<Vec<f32>> for TimeTrace {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

impl From<&[f32]> for TimeTrace {
    fn from(values: &[f32]) -> Self {
        Self::new(values.to_vec())
    }
}

impl Deref for TimeTrace {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.values
    }
}

/// Spatial mean of every frame: the common predictor for all pixels.
pub fn global_trace(stack: &Volume) -> Result<TimeTrace> {
    if stack.is_empty() {
        return Err(CorrMapError::EmptySequence);
    }

    let pixels = (stack.width() * stack.height()) as f64;
    let sums = stack
        .view()
        .mapv(|v| v as f64)
        .sum_axis(Axis(0))
        .sum_axis(Axis(0));

    let values: Vec<f32> = sums.iter().map(|s| (s / pixels) as f32).collect();
    debug!(frames = values.len(), "Global time trace extracted");
    Ok(TimeTrace::new(values))
}
