use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorrMapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid SER file: {0}")]
    InvalidSer(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Frame {index} is {actual_width}x{actual_height}, expected {width}x{height}")]
    FrameSizeMismatch {
        index: usize,
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Unsupported color mode: {0}")]
    UnsupportedColorMode(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Empty input: stack has no pixels or no frames")]
    EmptySequence,

    #[error("Regression model has not been computed yet")]
    UncomputedModel,

    #[error("Regression must have at least two values (got {len})")]
    InsufficientData { len: usize },

    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Seed ({x}, {y}) is outside the {width}x{height} image")]
    SeedOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Region of interest contains no pixels inside the image")]
    EmptyRoi,

    #[error("Cannot build residual volume: pixel ({x}, {y}) failed: {source}")]
    ResidualVolume {
        x: usize,
        y: usize,
        #[source]
        source: Box<CorrMapError>,
    },
}

pub type Result<T> = std::result::Result<T, CorrMapError>;
