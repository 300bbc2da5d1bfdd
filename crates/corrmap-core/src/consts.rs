/// Minimum pixel count (h*w) to use pixel-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Minimum number of frames a pixel trace needs for a linear fit.
pub const MIN_REGRESSION_POINTS: usize = 2;

/// Default radius (pixels) of the circular mean filter applied before analysis.
pub const DEFAULT_SMOOTHING_RADIUS: f32 = 20.0;

/// Lower bound of a Pearson correlation coefficient, mapped to black on export.
pub const CORRELATION_MIN: f32 = -1.0;

/// Upper bound of a Pearson correlation coefficient, mapped to white on export.
pub const CORRELATION_MAX: f32 = 1.0;
