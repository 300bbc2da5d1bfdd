use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SMOOTHING_RADIUS;
use crate::roi::Roi;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// SER file or directory of frames.
    pub input: PathBuf,
    /// Directory receiving correlation maps and residual frames.
    pub output_dir: PathBuf,
    /// Mean filter applied to every frame before analysis. A missing section
    /// keeps the default radius; `radius = 0` or `None` disables it.
    #[serde(default = "default_smoothing")]
    pub smoothing: Option<SmoothingConfig>,
    /// One correlation map is produced per region.
    #[serde(default)]
    pub regions: Vec<Roi>,
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_smoothing() -> Option<SmoothingConfig> {
    Some(SmoothingConfig::default())
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.ser"),
            output_dir: PathBuf::from("corrmap-out"),
            smoothing: default_smoothing(),
            regions: Vec::new(),
            export: ExportConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Radius of the circular mean kernel in pixels.
    pub radius: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_SMOOTHING_RADIUS,
        }
    }
}

/// Correlation maps are always written as 32-bit float TIFF with the raw
/// coefficients; previews are scaled copies for viewing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Also write the residual volume as a multi-page float TIFF.
    #[serde(default)]
    pub residuals: bool,
    /// Scaled 8/16-bit preview images next to the float outputs.
    #[serde(default)]
    pub preview: Option<ImageFormatChoice>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormatChoice {
    #[default]
    Tiff,
    Png,
}

impl ImageFormatChoice {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Tiff => "tiff",
            Self::Png => "png",
        }
    }
}

impl std::fmt::Display for ImageFormatChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tiff => write!(f, "TIFF (16-bit)"),
            Self::Png => write!(f, "PNG (8-bit)"),
        }
    }
}
