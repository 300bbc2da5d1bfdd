mod common;

use approx::assert_abs_diff_eq;

use corrmap_core::error::CorrMapError;
use corrmap_core::residual::{residual_trace, residual_volume};
use corrmap_core::trace::{global_trace, TimeTrace};
use corrmap_core::volume::Volume;

use common::noisy_stack;

#[test]
fn test_residual_volume_shape() {
    let stack = noisy_stack(5, 4, 6, 7);
    let global = global_trace(&stack).unwrap();
    let residuals = residual_volume(&stack, &global).unwrap();
    assert_eq!(residuals.width(), 5);
    assert_eq!(residuals.height(), 4);
    assert_eq!(residuals.frame_count(), 6);
}

#[test]
fn test_residuals_have_zero_mean() {
    // least-squares residuals with an intercept average to zero
    let stack = noisy_stack(3, 3, 12, 11);
    let global = global_trace(&stack).unwrap();
    let residuals = residual_volume(&stack, &global).unwrap();
    for x in 0..3 {
        for y in 0..3 {
            let trace = residuals.trace(x, y);
            let mean: f64 = trace.iter().map(|&v| v as f64).sum::<f64>() / trace.len() as f64;
            assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-5);
        }
    }
}

#[test]
fn test_pixel_following_global_has_zero_residual() {
    // every pixel is an affine function of the frame index, so every pixel
    // is an exact affine function of the global trace
    let stack = Volume::from_fn(3, 2, 5, |x, y, t| (x + 2 * y) as f32 + (1 + x) as f32 * t as f32);
    let global = global_trace(&stack).unwrap();
    let residuals = residual_volume(&stack, &global).unwrap();
    for &v in residuals.as_slice() {
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-5);
    }
}

#[test]
fn test_residuals_independent_of_iteration_order() {
    let stack = noisy_stack(6, 8, 10, 3);
    let global = global_trace(&stack).unwrap();

    let alone = residual_trace(&stack, &global, 3, 5).unwrap();
    let all = residual_volume(&stack, &global).unwrap();

    let stored = all.trace(3, 5);
    assert_eq!(alone.len(), stored.len());
    for (a, b) in alone.iter().zip(stored) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_parallel_and_sequential_paths_agree() {
    // 256 x 256 crosses the parallel threshold; the corner tile must match a
    // sequential per-pixel computation bit for bit
    let stack = noisy_stack(256, 256, 3, 5);
    let global = global_trace(&stack).unwrap();
    let all = residual_volume(&stack, &global).unwrap();
    for (x, y) in [(0, 0), (255, 0), (0, 255), (128, 77)] {
        let alone = residual_trace(&stack, &global, x, y).unwrap();
        assert_eq!(alone.as_slice(), all.trace(x, y));
    }
}

#[test]
fn test_frame_count_mismatch() {
    let stack = noisy_stack(2, 2, 8, 1);
    let global = TimeTrace::new(vec![0.5; 10]);
    let err = residual_volume(&stack, &global).unwrap_err();
    assert!(matches!(
        err,
        CorrMapError::DimensionMismatch {
            expected: 8,
            actual: 10,
            ..
        }
    ));
}

#[test]
fn test_single_frame_rejected() {
    let stack = Volume::from_fn(2, 2, 1, |x, y, _| (x + y) as f32);
    let global = global_trace(&stack).unwrap();
    assert!(matches!(
        residual_volume(&stack, &global),
        Err(CorrMapError::InsufficientData { len: 1 })
    ));
}

#[test]
fn test_residual_trace_out_of_bounds() {
    let stack = noisy_stack(2, 3, 4, 9);
    let global = global_trace(&stack).unwrap();
    assert!(residual_trace(&stack, &global, 2, 0).is_err());
    assert!(residual_trace(&stack, &global, 1, 2).is_ok());
}
