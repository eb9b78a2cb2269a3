//! Error types for colorcut-core
//!
//! Every configuration problem is reported before a sweep starts, so a
//! scan itself never fails: it either finds a line or it does not.

use thiserror::Error;

/// colorcut-core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Image has a zero width or height
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel buffers must carry 3 (RGB) or 4 (RGBA) samples per pixel
    #[error("invalid channel count: {0} (expected 3 or 4)")]
    InvalidChannels(usize),

    /// Pixel buffer shorter than `width * height * channels`
    #[error("pixel buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Integer code outside the cut direction constants
    #[error("invalid cut direction code: {0}")]
    InvalidDirection(i32),

    /// Integer code outside the threshold policy constants
    #[error("invalid threshold policy code: {0}")]
    InvalidPolicy(i32),

    /// Unparseable color specification
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Crop rectangle is not inside the image
    #[error("rectangle ({x}, {y}, {w}, {h}) is outside image bounds ({width}x{height})")]
    RectOutOfBounds {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        width: u32,
        height: u32,
    },

    /// Crop rectangle has zero area
    #[error("crop rectangle has zero area: {w}x{h}")]
    EmptyCrop { w: u32, h: u32 },
}

/// Result type alias for colorcut-core operations
pub type Result<T> = std::result::Result<T, Error>;
