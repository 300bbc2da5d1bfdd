use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::encoder::{colortype, TiffEncoder};
use tracing::debug;

use crate::error::{CorrMapError, Result};
use crate::frame::Frame;

/// Read every page of a grayscale TIFF as one frame each.
///
/// Integer pages are normalised to [0, 1] like the other loaders; 32-bit
/// float pages keep their raw values, NaN included.
pub fn load_tiff_stack(path: &Path) -> Result<Vec<Frame>> {
    let mut decoder =
        Decoder::new(BufReader::new(File::open(path)?))?.with_limits(Limits::unlimited());

    let mut frames = Vec::new();
    loop {
        let (w, h) = decoder.dimensions()?;
        let bit_depth = match decoder.colortype()? {
            tiff::ColorType::Gray(bits) => bits,
            other => {
                return Err(CorrMapError::UnsupportedColorMode(format!(
                    "TIFF page {} is {other:?}, expected grayscale",
                    frames.len()
                )))
            }
        };

        let samples: Vec<f32> = match decoder.read_image()? {
            DecodingResult::U8(buf) => buf.into_iter().map(|v| v as f32 / 255.0).collect(),
            DecodingResult::U16(buf) => buf.into_iter().map(|v| v as f32 / 65535.0).collect(),
            DecodingResult::F32(buf) => buf,
            _ => {
                return Err(CorrMapError::UnsupportedColorMode(format!(
                    "TIFF page {}: {bit_depth}-bit samples are not supported",
                    frames.len()
                )))
            }
        };
        let data = Array2::from_shape_vec((h as usize, w as usize), samples)
            .map_err(|_| CorrMapError::InvalidDimensions { width: w, height: h })?;

        let mut frame = Frame::new(data, bit_depth);
        frame.metadata.frame_index = frames.len();
        frames.push(frame);

        if !decoder.more_images() {
            break;
        }
        decoder.next_image()?;
    }

    debug!(path = %path.display(), pages = frames.len(), "TIFF stack loaded");
    Ok(frames)
}

/// Write planes as a multi-page 32-bit float grayscale TIFF, values untouched.
pub fn save_float_tiff_stack(planes: &[Array2<f32>], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    let mut encoder = TiffEncoder::new(&mut file)?;
    for plane in planes {
        let (h, w) = plane.dim();
        let samples: Vec<f32> = plane.iter().copied().collect();
        encoder.write_image::<colortype::Gray32Float>(w as u32, h as u32, &samples)?;
    }
    Ok(())
}

/// Write one plane as a single-page 32-bit float grayscale TIFF.
pub fn save_float_tiff(plane: &Array2<f32>, path: &Path) -> Result<()> {
    save_float_tiff_stack(std::slice::from_ref(plane), path)
}
