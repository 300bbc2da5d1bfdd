use ndarray::Array2;
use rayon::prelude::*;
use tracing::info;

use crate::consts::{PARALLEL_FRAME_THRESHOLD, PARALLEL_PIXEL_THRESHOLD};
use crate::error::Result;
use crate::frame::Frame;
use crate::volume::Volume;

/// Apply a circular mean filter to a frame.
pub fn mean_filter(frame: &Frame, radius: f32) -> Frame {
    let smoothed = mean_filter_array(&frame.data, radius);
    Frame::new(smoothed, frame.original_bit_depth)
}

/// Replace every pixel by the mean of its circular neighbourhood.
///
/// The kernel holds all offsets with `dx² + dy² <= radius² + 1`; pixels beyond
/// the border are replaced by the nearest edge pixel. A radius of zero or
/// less returns the input unchanged.
pub fn mean_filter_array(data: &Array2<f32>, radius: f32) -> Array2<f32> {
    if radius <= 0.0 {
        return data.clone();
    }
    let kernel = make_circular_kernel(radius);
    let (h, w) = data.dim();

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|row| (0..w).map(|col| kernel_mean(data, &kernel, row, col)).collect())
            .collect();

        let mut result = Array2::<f32>::zeros((h, w));
        for (row, row_data) in rows.into_iter().enumerate() {
            for (col, val) in row_data.into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
        result
    } else {
        let mut result = Array2::<f32>::zeros((h, w));
        for row in 0..h {
            for col in 0..w {
                result[[row, col]] = kernel_mean(data, &kernel, row, col);
            }
        }
        result
    }
}

/// Smooth every frame of a stack independently.
pub fn mean_filter_volume(stack: &Volume, radius: f32) -> Result<Volume> {
    if radius <= 0.0 {
        return Ok(stack.clone());
    }
    info!(radius, frames = stack.frame_count(), "Smoothing stack");

    let smooth_frame = |t: usize| stack.frame(t).map(|f| mean_filter_array(&f, radius));
    let frames: Vec<Array2<f32>> = if stack.frame_count() >= PARALLEL_FRAME_THRESHOLD {
        (0..stack.frame_count())
            .into_par_iter()
            .map(smooth_frame)
            .collect::<Result<_>>()?
    } else {
        (0..stack.frame_count())
            .map(smooth_frame)
            .collect::<Result<_>>()?
    };

    Ok(Volume::from_fn(
        stack.width(),
        stack.height(),
        stack.frame_count(),
        |x, y, t| frames[t][[y, x]],
    ))
}

/// Offsets (drow, dcol) inside a disc of the given radius.
fn make_circular_kernel(radius: f32) -> Vec<(isize, isize)> {
    let r2 = radius * radius + 1.0;
    let extent = (r2.sqrt() + 1e-6).floor() as isize;
    let mut offsets = Vec::new();
    for dy in -extent..=extent {
        for dx in -extent..=extent {
            if (dx * dx + dy * dy) as f32 <= r2 {
                offsets.push((dy, dx));
            }
        }
    }
    offsets
}

fn kernel_mean(data: &Array2<f32>, kernel: &[(isize, isize)], row: usize, col: usize) -> f32 {
    let (h, w) = data.dim();
    let mut sum = 0.0f64;
    for &(dy, dx) in kernel {
        let src_row = (row as isize + dy).clamp(0, h as isize - 1) as usize;
        let src_col = (col as isize + dx).clamp(0, w as isize - 1) as usize;
        sum += data[[src_row, src_col]] as f64;
    }
    (sum / kernel.len() as f64) as f32
}
