#![allow(dead_code)]

use corrmap_core::io::ser::SER_HEADER_SIZE;
use corrmap_core::volume::Volume;

/// Build a SER file header with configurable bit depth and color mode.
///
/// `color_id`: 0=MONO, 8=BAYER_RGGB, 100=RGB, 101=BGR
pub fn build_ser_header_full(
    width: u32,
    height: u32,
    bit_depth: u32,
    num_frames: usize,
    color_id: i32,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);

    // Magic (14 bytes)
    buf.extend_from_slice(b"LUCAM-RECORDER");
    // LuID, ColorID, LittleEndian
    buf.extend_from_slice(&0i32.to_le_bytes());
    buf.extend_from_slice(&color_id.to_le_bytes());
    buf.extend_from_slice(&0i32.to_le_bytes());
    buf.extend_from_slice(&(width as i32).to_le_bytes());
    buf.extend_from_slice(&(height as i32).to_le_bytes());
    buf.extend_from_slice(&(bit_depth as i32).to_le_bytes());
    buf.extend_from_slice(&(num_frames as i32).to_le_bytes());
    // Observer, Instrument, Telescope (40 bytes each)
    buf.extend_from_slice(&[0u8; 120]);
    // DateTime, DateTimeUTC
    buf.extend_from_slice(&0u64.to_le_bytes());
    buf.extend_from_slice(&0u64.to_le_bytes());

    assert_eq!(buf.len(), SER_HEADER_SIZE);
    buf
}

/// Complete mono 8-bit SER file; each frame is row-major `width * height` bytes.
pub fn build_ser_with_frames(width: u32, height: u32, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = build_ser_header_full(width, height, 8, frames.len(), 0);
    for frame in frames {
        buf.extend_from_slice(frame);
    }
    buf
}

/// Write a SER buffer to a temporary file that lives as long as the handle.
pub fn write_test_ser(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(data).expect("write SER data");
    f.flush().expect("flush");
    f
}

/// Volume from explicit per-pixel traces, `traces[y][x]` = trace of (x, y).
pub fn volume_from_traces(traces: &[Vec<Vec<f32>>]) -> Volume {
    let height = traces.len();
    let width = traces[0].len();
    let frames = traces[0][0].len();
    Volume::from_fn(width, height, frames, |x, y, t| traces[y][x][t])
}

/// Deterministic pseudo-random values in [-0.5, 0.5).
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32 / (1u64 << 24) as f32) - 0.5
    }
}

/// Stack whose pixels follow a shared ramp plus independent noise.
pub fn noisy_stack(width: usize, height: usize, frames: usize, seed: u64) -> Volume {
    let mut rng = Lcg::new(seed);
    let noise: Vec<f32> = (0..width * height * frames).map(|_| rng.next_f32()).collect();
    Volume::from_fn(width, height, frames, |x, y, t| {
        1.0 + 0.25 * t as f32 + 0.1 * noise[(x * height + y) * frames + t]
    })
}
