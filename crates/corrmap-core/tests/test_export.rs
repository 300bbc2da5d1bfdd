use ndarray::Array2;

use corrmap_core::correlation::{CorrelationMap, Seed};
use corrmap_core::io::export::{
    correlation_preview, residual_preview_frames, save_correlation_map, save_correlation_preview,
    save_residual_previews, save_residual_stack,
};
use corrmap_core::io::image_io::load_image;
use corrmap_core::io::load_stack;
use corrmap_core::io::tiff_stack::load_tiff_stack;
use corrmap_core::volume::Volume;

fn sample_map() -> CorrelationMap {
    let data = Array2::from_shape_vec((2, 3), vec![-1.0, 0.0, 1.0, f32::NAN, 0.5, -0.5]).unwrap();
    CorrelationMap {
        data,
        seed: Seed::new(2, 0),
    }
}

// ---------------------------------------------------------------------------
// Correlation maps
// ---------------------------------------------------------------------------

#[test]
fn test_saved_map_keeps_undefined_apart_from_minus_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.tiff");
    save_correlation_map(&sample_map(), &path).unwrap();

    let pages = load_tiff_stack(&path).unwrap();
    assert_eq!(pages.len(), 1);
    let loaded = &pages[0];
    assert_eq!(loaded.original_bit_depth, 32);
    assert_eq!(loaded.width(), 3);
    assert_eq!(loaded.height(), 2);

    assert_eq!(loaded.data[[0, 0]], -1.0);
    assert!(loaded.data[[1, 0]].is_nan());
    assert_ne!(
        loaded.data[[0, 0]].to_bits(),
        loaded.data[[1, 0]].to_bits()
    );
}

#[test]
fn test_saved_map_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.tiff");
    let mut map = sample_map();
    map.data[[1, 1]] = 0.123_456_79;
    save_correlation_map(&map, &path).unwrap();

    let loaded = &load_tiff_stack(&path).unwrap()[0];
    for ((y, x), &v) in map.data.indexed_iter() {
        if v.is_nan() {
            assert!(loaded.data[[y, x]].is_nan());
        } else {
            assert_eq!(loaded.data[[y, x]], v, "mismatch at ({x}, {y})");
        }
    }
}

#[test]
fn test_correlation_preview_mapping() {
    let frame = correlation_preview(&sample_map());
    assert_eq!(frame.width(), 3);
    assert_eq!(frame.height(), 2);
    assert_eq!(frame.data[[0, 0]], 0.0);
    assert_eq!(frame.data[[0, 1]], 0.5);
    assert_eq!(frame.data[[0, 2]], 1.0);
    assert_eq!(frame.data[[1, 1]], 0.75);
}

#[test]
fn test_save_correlation_preview() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map_preview.png");
    save_correlation_preview(&sample_map(), &path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.original_bit_depth, 8);
    assert!((loaded.data[[0, 2]] - 1.0).abs() < 1e-2);
    assert!((loaded.data[[1, 2]] - 0.25).abs() < 1e-2);
}

// ---------------------------------------------------------------------------
// Residuals
// ---------------------------------------------------------------------------

#[test]
fn test_residual_stack_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("residuals.tiff");
    let residuals = Volume::from_fn(3, 2, 4, |x, y, t| x as f32 - 0.5 * y as f32 - 0.25 * t as f32);
    save_residual_stack(&residuals, &path).unwrap();

    let (loaded, info) = load_stack(&path).unwrap();
    assert_eq!(info.bit_depth, 32);
    assert_eq!(loaded, residuals);
}

#[test]
fn test_residual_previews_normalised() {
    let residuals = Volume::from_fn(2, 2, 3, |x, y, t| (x + y) as f32 - t as f32);
    let frames = residual_preview_frames(&residuals).unwrap();
    assert_eq!(frames.len(), 3);
    // range is [-2, 2]
    assert_eq!(frames[0].data[[1, 1]], 1.0);
    assert_eq!(frames[2].data[[0, 0]], 0.0);
    assert_eq!(frames[1].metadata.frame_index, 1);
}

#[test]
fn test_flat_residual_previews_are_black() {
    let residuals = Volume::from_fn(2, 2, 2, |_, _, _| 0.0);
    let frames = residual_preview_frames(&residuals).unwrap();
    assert!(frames.iter().all(|f| f.data.iter().all(|&v| v == 0.0)));
}

#[test]
fn test_save_residual_previews() {
    let dir = tempfile::tempdir().unwrap();
    let residuals = Volume::from_fn(3, 2, 4, |x, _, t| x as f32 * t as f32);
    let written = save_residual_previews(&residuals, &dir.path().join("res"), "png").unwrap();
    assert_eq!(written.len(), 4);
    assert!(written[3].ends_with("residual_00003.png"));
    assert!(written.iter().all(|p| p.exists()));
}
