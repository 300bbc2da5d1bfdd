use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{CorrMapError, Result};
use crate::volume::Volume;

/// Reference pixel for a correlation query. `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    pub x: usize,
    pub y: usize,
}

impl Seed {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// True for the "undefined correlation" outcome: a zero-variance trace makes
/// the Pearson denominator zero and the division yields NaN or infinity.
pub fn is_undefined_correlation(value: f32) -> bool {
    !value.is_finite()
}

/// Pearson correlation of every pixel's residual trace with one seed trace.
#[derive(Clone, Debug)]
pub struct CorrelationMap {
    /// Row-major, shape = (height, width), indexed `[[y, x]]`.
    pub data: Array2<f32>,
    pub seed: Seed,
}

impl CorrelationMap {
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Coefficient at column `x`, row `y`.
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.data[[y, x]]
    }

    /// Location and value of the largest defined coefficient.
    pub fn peak(&self) -> Option<(Seed, f32)> {
        self.data
            .indexed_iter()
            .filter(|(_, v)| !is_undefined_correlation(**v))
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|((y, x), &v)| (Seed::new(x, y), v))
    }

    pub fn undefined_count(&self) -> usize {
        self.data
            .iter()
            .filter(|v| is_undefined_correlation(**v))
            .count()
    }
}

/// Direct sum form of the Pearson coefficient:
/// `(n·Σxy − Σx·Σy) / sqrt((n·Σx² − (Σx)²)·(n·Σy² − (Σy)²))`.
///
/// A zero denominator is not special-cased.
pub fn pearson(xs: &[f32], ys: &[f32]) -> f32 {
    let n = xs.len() as f64;
    let (mut sx, mut sy, mut sxy, mut sxx, mut syy) = (0.0f64, 0.0f64, 0.0f64, 0.0f64, 0.0f64);

    for (&x, &y) in xs.iter().zip(ys) {
        let (x, y) = (x as f64, y as f64);
        sx += x;
        sy += y;
        sxy += x * y;
        sxx += x * x;
        syy += y * y;
    }

    let num = n * sxy - sx * sy;
    let den = ((n * sxx - sx * sx) * (n * syy - sy * sy)).sqrt();
    (num / den) as f32
}

/// Correlate the residual trace at `seed` with every pixel of `residuals`.
///
/// `residuals` is only read, so any number of queries can share it.
pub fn correlation_map(residuals: &Volume, seed: Seed) -> Result<CorrelationMap> {
    let (w, h) = (residuals.width(), residuals.height());
    if !residuals.contains(seed.x, seed.y) {
        return Err(CorrMapError::SeedOutOfBounds {
            x: seed.x,
            y: seed.y,
            width: w,
            height: h,
        });
    }

    let seed_trace = residuals.trace(seed.x, seed.y);

    let data = if w * h >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|y| {
                (0..w)
                    .map(|x| pearson(residuals.trace(x, y), seed_trace))
                    .collect()
            })
            .collect();

        let mut result = Array2::<f32>::zeros((h, w));
        for (y, row) in rows.into_iter().enumerate() {
            for (x, val) in row.into_iter().enumerate() {
                result[[y, x]] = val;
            }
        }
        result
    } else {
        Array2::from_shape_fn((h, w), |(y, x)| pearson(residuals.trace(x, y), seed_trace))
    };

    let map = CorrelationMap { data, seed };
    let undefined = map.undefined_count();
    if undefined > 0 {
        warn!(%seed, undefined, "Correlation undefined for zero-variance traces");
    }
    debug!(%seed, "Correlation map computed");
    Ok(map)
}
