//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use colorcut_core::{Rect, RgbaImage};
use colorcut_io::ImageFormat;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything unrecognized is `Compare`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of one regression test: its name, the running check
/// index, the mode, and every failure seen so far. Checks never panic;
/// call [`RegParams::cleanup`] and assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "scan")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters, configured from
    /// `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ))
        } else {
            true
        }
    }

    /// Compare two sequences of floating-point values element by element
    pub fn compare_series(&mut self, expected: &[f64], actual: &[f64], delta: f64) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            return self.fail(format!(
                "Failure in {}_reg: series comparison for index {} - length {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            ));
        }
        for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
            if (e - a).abs() > delta {
                return self.fail(format!(
                    "Failure in {}_reg: series comparison for index {} - element {}: \
                     expected {}, actual {}",
                    self.test_name, self.index, i, e, a
                ));
            }
        }
        true
    }

    /// Compare scan outcomes: both `None`, or equal rectangles
    pub fn compare_rect(&mut self, expected: Option<Rect>, actual: Option<Rect>) -> bool {
        self.index += 1;

        if expected != actual {
            self.fail(format!(
                "Failure in {}_reg: rect comparison for index {}\n\
                 expected = {:?}, actual = {:?}",
                self.test_name, self.index, expected, actual
            ))
        } else {
            true
        }
    }

    /// Compare two images for exact equality
    pub fn compare_images(&mut self, img1: &RgbaImage, img2: &RgbaImage) -> bool {
        self.index += 1;

        if img1.width() != img2.width() || img1.height() != img2.height() {
            return self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - dimension mismatch \
                 {}x{} vs {}x{}",
                self.test_name,
                self.index,
                img1.width(),
                img1.height(),
                img2.width(),
                img2.height()
            ));
        }

        match first_difference(img1, img2) {
            Some((x, y)) => self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name, self.index, x, y
            )),
            None => true,
        }
    }

    /// Write an image to the regout directory and check it against its
    /// golden file.
    pub fn write_image_and_check(&mut self, img: &RgbaImage, format: ImageFormat) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );

        colorcut_io::write_image(img, &local_path, format).map_err(|e| TestError::ImageWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;

        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden. In compare mode,
    /// compares with the golden file if one exists. In display mode, does
    /// nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                // Golden files are produced on demand with REGTEST_MODE=generate
                if !Path::new(&golden_path).exists() {
                    eprintln!("No golden file yet: {}", golden_path);
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !same_pixels(local_path, &golden_path) {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn first_difference(img1: &RgbaImage, img2: &RgbaImage) -> Option<(u32, u32)> {
    let width = img1.width();
    (0..img1.height())
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .find(|&(x, y)| img1.get_rgba(x, y) != img2.get_rgba(x, y))
}

/// Decode two image files and compare their pixels
fn same_pixels(path1: &str, path2: &str) -> bool {
    match (colorcut_io::read_image(path1), colorcut_io::read_image(path2)) {
        (Ok(img1), Ok(img2)) => img1 == img2,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse("generate"), RegTestMode::Generate);
        assert_eq!(RegTestMode::parse("DISPLAY"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("bogus"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params_values");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 3);
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_series_and_rect() {
        let mut rp = RegParams::new("params_series");
        assert!(rp.compare_series(&[1.0, 2.0], &[1.0, 2.0], 0.0));
        assert!(!rp.compare_series(&[1.0], &[1.0, 2.0], 0.0));
        assert!(rp.compare_rect(None, None));
        assert!(rp.compare_rect(Some(Rect::new(0, 1, 2, 3)), Some(Rect::new(0, 1, 2, 3))));
        assert!(!rp.compare_rect(Some(Rect::new(0, 0, 1, 1)), None));
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_images() {
        let mut rp = RegParams::new("params_images");
        let a = RgbaImage::new(2, 2).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_images(&a, &b));
        b.set_rgba(1, 1, [1, 1, 1, 255]).unwrap();
        assert!(!rp.compare_images(&a, &b));
        assert!(!rp.compare_images(&a, &RgbaImage::new(3, 2).unwrap()));
    }
}
