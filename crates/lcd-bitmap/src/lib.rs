//! Monochrome bitmap conversion for small LCD/OLED controllers.
//!
//! Turns a decoded image into a 1-bit-per-pixel raster, packs it MSB-first
//! with every row padded to a whole byte, and renders the bytes as an array
//! initializer. Also provides nearest-neighbour scaling for previews.

pub mod binarize;
pub mod encode;
pub mod luma;
pub mod options;
pub mod scale;

// Re-exports for convenience
pub use binarize::{BinaryRaster, floyd_steinberg_binary, to_binary};
pub use encode::{CodeText, PackedBitmap, encode};
pub use luma::luma_of;
pub use options::{BitPolarity, ConvertOptions};
pub use scale::{PreviewBounds, ScaledBuffer, fit_factor, scale};

/// Default binarization cutoff: luma at or above this value is light.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Default upper bound on preview magnification.
pub const DEFAULT_MAX_SCALE_FACTOR: f32 = 5.0;

/// Default preview bounding box width in pixels.
pub const DEFAULT_MAX_PREVIEW_WIDTH: u32 = 500;

/// Default preview bounding box height in pixels.
pub const DEFAULT_MAX_PREVIEW_HEIGHT: u32 = 300;

/// Errors produced by the conversion core.
#[derive(Debug, thiserror::Error)]
pub enum LcdBitmapError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Invalid scale factor: {0} (must be finite and greater than 0)")]
    InvalidScaleFactor(f32),

    #[error("Raster size mismatch: expected {expected} bits, got {actual}")]
    RasterSize { expected: usize, actual: usize },

    #[error("Invalid bit value {value} at index {index} (expected 0 or 1)")]
    InvalidBit { index: usize, value: u8 },
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, LcdBitmapError>;
