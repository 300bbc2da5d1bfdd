use rayon::prelude::*;
use tracing::{info, warn};

use crate::consts::{MIN_REGRESSION_POINTS, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{CorrMapError, Result};
use crate::regression::LinearRegression;
use crate::trace::TimeTrace;
use crate::volume::Volume;

/// Residual trace of pixel `(x, y)` after removing its linear fit against
/// `global`.
///
/// Touches only that pixel's trace, so the result does not depend on which
/// other pixels were processed before it.
pub fn residual_trace(stack: &Volume, global: &TimeTrace, x: usize, y: usize) -> Result<TimeTrace> {
    check_inputs(stack, global)?;
    if !stack.contains(x, y) {
        return Err(CorrMapError::SeedOutOfBounds {
            x,
            y,
            width: stack.width(),
            height: stack.height(),
        });
    }
    pixel_residuals(global, stack.trace(x, y)).map(TimeTrace::new)
}

/// Regress every pixel trace on `global` and collect the per-frame residuals
/// into a volume of the same shape as `stack`.
///
/// Validation happens up front; a failure on any pixel aborts the whole build
/// so no partially filled volume ever escapes.
pub fn residual_volume(stack: &Volume, global: &TimeTrace) -> Result<Volume> {
    check_inputs(stack, global)?;

    let (w, h, n) = (stack.width(), stack.height(), stack.frame_count());
    info!(width = w, height = h, frames = n, "Building residual volume");

    // Pixel p = x * h + y; concatenating traces in p order reproduces the
    // volume's flat layout.
    let per_pixel = |p: usize| {
        let (x, y) = (p / h, p % h);
        pixel_residuals(global, stack.trace(x, y)).map_err(|e| CorrMapError::ResidualVolume {
            x,
            y,
            source: Box::new(e),
        })
    };

    let traces: Vec<Vec<f32>> = if w * h >= PARALLEL_PIXEL_THRESHOLD {
        (0..w * h)
            .into_par_iter()
            .map(per_pixel)
            .collect::<Result<_>>()?
    } else {
        (0..w * h).map(per_pixel).collect::<Result<_>>()?
    };

    let data: Vec<f32> = traces.into_iter().flatten().collect();
    let residuals = Volume::from_vec(w, h, n, data)?;

    if residuals.as_slice().iter().any(|v| !v.is_finite()) {
        warn!("Residual volume contains non-finite values; the global trace may be flat");
    }
    Ok(residuals)
}

fn check_inputs(stack: &Volume, global: &TimeTrace) -> Result<()> {
    if stack.frame_count() != global.len() {
        return Err(CorrMapError::DimensionMismatch {
            what: "global trace length vs stack frame count",
            expected: stack.frame_count(),
            actual: global.len(),
        });
    }
    if stack.frame_count() < MIN_REGRESSION_POINTS {
        return Err(CorrMapError::InsufficientData {
            len: stack.frame_count(),
        });
    }
    Ok(())
}

fn pixel_residuals(global: &[f32], pixel: &[f32]) -> Result<Vec<f32>> {
    let mut model = LinearRegression::new(global, pixel);
    model.compute()?;
    global
        .iter()
        .zip(pixel)
        .map(|(&g, &p)| model.error_at(g as f64, p as f64).map(|e| e as f32))
        .collect()
}
