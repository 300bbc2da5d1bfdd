use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::info;

use crate::consts::{CORRELATION_MAX, CORRELATION_MIN};
use crate::correlation::{is_undefined_correlation, CorrelationMap};
use crate::error::Result;
use crate::frame::Frame;
use crate::volume::Volume;

use super::image_io::save_image;
use super::tiff_stack::{save_float_tiff, save_float_tiff_stack};

/// Write the raw coefficients as a 32-bit float TIFF. Undefined coefficients
/// stay NaN.
pub fn save_correlation_map(map: &CorrelationMap, path: &Path) -> Result<()> {
    save_float_tiff(&map.data, path)?;
    info!(path = %path.display(), seed = %map.seed, "Correlation map saved");
    Ok(())
}

/// Display frame for a correlation map: [-1, 1] maps linearly onto [0, 1],
/// undefined coefficients become 0. Lossy, for viewing only.
pub fn correlation_preview(map: &CorrelationMap) -> Frame {
    let span = CORRELATION_MAX - CORRELATION_MIN;
    let data = map.data.mapv(|v| {
        if is_undefined_correlation(v) {
            0.0
        } else {
            ((v - CORRELATION_MIN) / span).clamp(0.0, 1.0)
        }
    });
    Frame::new(data, 16)
}

pub fn save_correlation_preview(map: &CorrelationMap, path: &Path) -> Result<()> {
    save_image(&correlation_preview(map), path)
}

/// Write the residual volume as one multi-page 32-bit float TIFF, a page per
/// frame, raw values.
pub fn save_residual_stack(residuals: &Volume, path: &Path) -> Result<()> {
    let planes: Vec<Array2<f32>> = (0..residuals.frame_count())
        .map(|t| residuals.frame(t))
        .collect::<Result<_>>()?;
    save_float_tiff_stack(&planes, path)?;
    info!(path = %path.display(), frames = planes.len(), "Residual stack saved");
    Ok(())
}

/// Display frames for a residual volume, normalised by its finite range.
pub fn residual_preview_frames(residuals: &Volume) -> Result<Vec<Frame>> {
    let (lo, hi) = residuals.finite_range().unwrap_or((0.0, 0.0));
    let span = hi - lo;

    (0..residuals.frame_count())
        .map(|t| -> Result<Frame> {
            let data = residuals.frame(t)?.mapv(|v| {
                if !v.is_finite() || span <= 0.0 {
                    0.0
                } else {
                    (v - lo) / span
                }
            });
            let mut frame = Frame::new(data, 16);
            frame.metadata.frame_index = t;
            Ok(frame)
        })
        .collect()
}

/// Write one preview image per residual frame into `dir` as
/// `residual_NNNNN.<ext>`.
pub fn save_residual_previews(residuals: &Volume, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let frames = residual_preview_frames(residuals)?;
    let mut written = Vec::with_capacity(frames.len());
    for frame in &frames {
        let path = dir.join(format!(
            "residual_{:05}.{extension}",
            frame.metadata.frame_index
        ));
        save_image(frame, &path)?;
        written.push(path);
    }
    info!(dir = %dir.display(), frames = written.len(), "Residual previews saved");
    Ok(written)
}
