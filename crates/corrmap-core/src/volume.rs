use ndarray::{Array2, ArrayView3};

use crate::error::{CorrMapError, Result};
use crate::frame::Frame;

/// A width x height x frames block of f32 samples.
///
/// `x` is the column (`0..width`), `y` is the row (`0..height`) and `t` the
/// frame index. Samples live in one flat buffer laid out as
/// `(x, y, t) -> (x * height + y) * frames + t`, so the time trace of a pixel
/// is a contiguous slice. Every stage of the analysis uses this layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Volume {
    data: Vec<f32>,
    width: usize,
    height: usize,
    frames: usize,
}

impl Volume {
    /// Wrap a flat buffer that is already in `(x, y, t)` order.
    pub fn from_vec(width: usize, height: usize, frames: usize, data: Vec<f32>) -> Result<Self> {
        let expected = width * height * frames;
        if data.len() != expected {
            return Err(CorrMapError::DimensionMismatch {
                what: "volume buffer length",
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            frames,
        })
    }

    /// Build a volume by evaluating `f(x, y, t)` for every sample.
    pub fn from_fn<F>(width: usize, height: usize, frames: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> f32,
    {
        let mut data = Vec::with_capacity(width * height * frames);
        for x in 0..width {
            for y in 0..height {
                for t in 0..frames {
                    data.push(f(x, y, t));
                }
            }
        }
        Self {
            data,
            width,
            height,
            frames,
        }
    }

    /// Stack row-major frames into a volume. All frames must share one size.
    pub fn from_frames(frames: &[Frame]) -> Result<Self> {
        let first = frames.first().ok_or(CorrMapError::EmptySequence)?;
        let (h, w) = first.data.dim();

        for (index, frame) in frames.iter().enumerate() {
            if frame.data.dim() != (h, w) {
                return Err(CorrMapError::FrameSizeMismatch {
                    index,
                    width: w,
                    height: h,
                    actual_width: frame.width(),
                    actual_height: frame.height(),
                });
            }
        }

        Ok(Self::from_fn(w, h, frames.len(), |x, y, t| {
            frames[t].data[[y, x]]
        }))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (x * self.height + y) * self.frames
    }

    /// Sample at `(x, y, t)`. Panics when out of range, like slice indexing.
    #[inline]
    pub fn get(&self, x: usize, y: usize, t: usize) -> f32 {
        debug_assert!(self.contains(x, y) && t < self.frames);
        self.data[self.offset(x, y) + t]
    }

    /// Time trace of pixel `(x, y)`. Panics when out of range.
    #[inline]
    pub fn trace(&self, x: usize, y: usize) -> &[f32] {
        let start = self.offset(x, y);
        &self.data[start..start + self.frames]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Read-only ndarray view with shape `(width, height, frames)`.
    pub fn view(&self) -> ArrayView3<'_, f32> {
        ArrayView3::from_shape((self.width, self.height, self.frames), &self.data)
            .expect("buffer size matches dimensions")
    }

    /// Copy frame `t` out as a row-major `(height, width)` array.
    pub fn frame(&self, t: usize) -> Result<Array2<f32>> {
        if t >= self.frames {
            return Err(CorrMapError::FrameIndexOutOfRange {
                index: t,
                total: self.frames,
            });
        }
        Ok(Array2::from_shape_fn((self.height, self.width), |(y, x)| {
            self.get(x, y, t)
        }))
    }

    /// Finite min/max over all samples, `None` if no sample is finite.
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
