//! colorcut - crop images at a color line
//!
//! Scans an image from one edge for the first row or column whose share
//! of pixels matching a target color crosses a threshold, and crops the
//! image at that line.
//!
//! # Example
//!
//! ```
//! use colorcut::{CutDirection, Rect, Rgb, RgbaImage, ScanOptions, ThresholdPolicy, find_cut_rect};
//!
//! // 8x8 image with a 3-row white footer
//! let mut img = RgbaImage::new(8, 8).unwrap();
//! img.fill_rect(Rect::new(0, 5, 8, 3), [255, 255, 255, 255]);
//!
//! // Walk up from the bottom until a row is less than 10% white
//! let options = ScanOptions::new()
//!     .with_target(Rgb::WHITE)
//!     .with_deviation(8)
//!     .with_threshold(10.0)
//!     .with_direction(CutDirection::Bottom)
//!     .with_policy(ThresholdPolicy::LastLineUnder);
//!
//! let rect = find_cut_rect(&img, &options).unwrap();
//! assert_eq!(rect, Some(Rect::new(0, 0, 8, 4)));
//! ```

mod cut;
mod error;

pub use cut::{
    cut_image, cut_image_by_color_line, cut_image_bytes_by_color_line,
    cut_image_bytes_to_data_url, cut_image_file, cut_image_to_data_url, find_cut_rect,
};
pub use error::{Error, Result};

// Re-export core types (used in every call)
pub use colorcut_core::{
    Axis, ColorMatcher, CutDirection, LineMatch, LineScanner, PixelView, Rect, Rgb, RgbaImage,
    ScanOptions, ThresholdPolicy, color_matches, find_line,
};

// Re-export the image collaborator as a module
pub use colorcut_io as io;
