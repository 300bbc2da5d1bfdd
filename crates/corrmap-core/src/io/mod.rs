pub mod export;
pub mod image_io;
pub mod ser;
pub mod tiff_stack;

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::frame::{ColorMode, Frame, SourceInfo};
use crate::volume::Volume;

/// True for `.tif` / `.tiff`, any case.
pub fn is_tiff_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"))
}

/// Load an analysis stack from a SER file, a (multi-page) TIFF stack or a
/// directory of image frames.
pub fn load_stack(path: &Path) -> Result<(Volume, SourceInfo)> {
    if path.is_dir() {
        let frames = image_io::load_image_sequence(path)?;
        let (volume, info) = stack_from_frames(path, &frames)?;
        info!(frames = info.total_frames, "Loaded image sequence");
        Ok((volume, info))
    } else if is_tiff_path(path) {
        let frames = tiff_stack::load_tiff_stack(path)?;
        let (volume, info) = stack_from_frames(path, &frames)?;
        info!(frames = info.total_frames, bit_depth = info.bit_depth, "Loaded TIFF stack");
        Ok((volume, info))
    } else {
        let reader = ser::SerReader::open(path)?;
        let info = reader.source_info(path);
        let volume = reader.read_volume()?;
        info!(frames = info.total_frames, "Loaded SER file");
        Ok((volume, info))
    }
}

fn stack_from_frames(path: &Path, frames: &[Frame]) -> Result<(Volume, SourceInfo)> {
    let volume = Volume::from_frames(frames)?;
    let info = SourceInfo {
        filename: path.to_path_buf(),
        total_frames: volume.frame_count(),
        width: volume.width() as u32,
        height: volume.height() as u32,
        bit_depth: frames.first().map_or(0, |f| f.original_bit_depth),
        color_mode: ColorMode::Mono,
        observer: None,
        telescope: None,
        instrument: None,
    };
    Ok((volume, info))
}
