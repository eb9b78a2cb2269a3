//! colorcut core - color line detection and crop geometry
//!
//! This crate holds the pure computation of colorcut:
//!
//! - [`Rgb`] / [`ColorMatcher`] - Target color and tolerance predicate
//! - [`PixelView`] - Borrowed RGB/RGBA pixel buffer
//! - [`RgbaImage`] - Owned decoded image
//! - [`Rect`] - Crop rectangles
//! - [`LineScanner`] / [`ScanOptions`] - The directional line sweep
//!
//! Nothing here performs I/O or holds global state; every type is
//! `Send + Sync` and a scan only borrows its input.

pub mod color;
pub mod error;
pub mod image;
pub mod rect;
pub mod scan;

pub use color::{ColorMatcher, Rgb, color_matches};
pub use error::{Error, Result};
pub use image::{PixelView, RgbaImage};
pub use rect::Rect;
pub use scan::{Axis, CutDirection, LineMatch, LineScanner, ScanOptions, ThresholdPolicy, find_line};
