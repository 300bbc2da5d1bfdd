use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Luma};
use ndarray::Array2;
use tracing::debug;

use crate::error::{CorrMapError, Result};
use crate::frame::Frame;

use super::is_tiff_path;
use super::tiff_stack::load_tiff_stack;

const SEQUENCE_EXTENSIONS: &[&str] = &["tif", "tiff", "png", "jpg", "jpeg", "bmp"];

/// Save a frame as 16-bit grayscale TIFF.
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let pixels: Vec<u16> = frame
        .data
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 65535.0) as u16)
        .collect();

    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save(path)?;
    Ok(())
}

/// Save a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = (frame.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save frame, choosing format from file extension.
pub fn save_image(frame: &Frame, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => save_png(frame, path),
        _ => save_tiff(frame, path),
    }
}

/// Load a grayscale image file into a Frame, keeping the source bit depth.
pub fn load_image(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    let color = img.color();
    let bit_depth = (color.bits_per_pixel() / color.channel_count() as u16) as u8;
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        gray.get_pixel(col as u32, row as u32).0[0] as f32 / 65535.0
    });
    Ok(Frame::new(data, bit_depth))
}

/// Image files in `dir`, sorted by file name.
pub fn list_image_sequence(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| SEQUENCE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Load every image of a directory in file name order. TIFF files contribute
/// all of their pages.
pub fn load_image_sequence(dir: &Path) -> Result<Vec<Frame>> {
    let paths = list_image_sequence(dir)?;
    if paths.is_empty() {
        return Err(CorrMapError::EmptySequence);
    }
    debug!(dir = %dir.display(), files = paths.len(), "Loading image sequence");

    let mut frames = Vec::with_capacity(paths.len());
    for path in &paths {
        if is_tiff_path(path) {
            frames.extend(load_tiff_stack(path)?);
        } else {
            frames.push(load_image(path)?);
        }
    }
    for (i, frame) in frames.iter_mut().enumerate() {
        frame.metadata.frame_index = i;
    }
    Ok(frames)
}
