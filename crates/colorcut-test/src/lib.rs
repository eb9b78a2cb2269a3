//! colorcut-test - Regression test framework for colorcut
//!
//! Runs in three modes:
//!
//! - **Generate**: Write golden files for later comparison
//! - **Compare**: Compare results with golden files (default)
//! - **Display**: Run checks without touching golden files
//!
//! # Usage
//!
//! ```ignore
//! use colorcut_test::RegParams;
//!
//! let mut rp = RegParams::new("scan");
//! rp.compare_values(100.0, percent, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use colorcut_core::{Rect, RgbaImage};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // colorcut-test is at crates/colorcut-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Build an RGBA image from horizontal color bands.
///
/// Each `(rows, rgb)` band paints `rows` full-width rows, top to bottom.
///
/// # Panics
///
/// Panics if the bands add up to zero rows or `width` is 0.
pub fn make_row_bands(width: u32, bands: &[(u32, [u8; 3])]) -> RgbaImage {
    let height: u32 = bands.iter().map(|(rows, _)| rows).sum();
    let mut img = RgbaImage::new(width, height).expect("non-empty band image");
    let mut y = 0;
    for &(rows, [r, g, b]) in bands {
        img.fill_rect(Rect::new(0, y, width, rows), [r, g, b, 255]);
        y += rows;
    }
    img
}

/// Build an RGBA image from vertical color bands.
///
/// Each `(cols, rgb)` band paints `cols` full-height columns, left to
/// right.
///
/// # Panics
///
/// Panics if the bands add up to zero columns or `height` is 0.
pub fn make_col_bands(height: u32, bands: &[(u32, [u8; 3])]) -> RgbaImage {
    let width: u32 = bands.iter().map(|(cols, _)| cols).sum();
    let mut img = RgbaImage::new(width, height).expect("non-empty band image");
    let mut x = 0;
    for &(cols, [r, g, b]) in bands {
        img.fill_rect(Rect::new(x, 0, cols, height), [r, g, b, 255]);
        x += cols;
    }
    img
}
