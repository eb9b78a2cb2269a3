//! Target colors and tolerance matching
//!
//! A sample matches a target when every channel difference
//! `target - sample` lies in `[-deviation, deviation]`. Alpha never
//! takes part in matching.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An RGB color.
///
/// Channels are plain integers with no range check. Values outside
/// `[0, 255]` are legal; they just never match a decoded 8-bit sample
/// unless the deviation is wide enough to reach back into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: i32,
    /// Green channel
    pub g: i32,
    /// Blue channel
    pub b: i32,
}

impl Rgb {
    /// Pure black
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Pure white
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from channel values.
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Signed per-channel difference `self - other`.
    ///
    /// Widened to `i64` so any pair of `i32` channels has an exact difference.
    #[inline]
    pub fn deviation_from(&self, other: Rgb) -> (i64, i64, i64) {
        let diff = |a: i32, b: i32| a as i64 - b as i64;
        (diff(self.r, other.r), diff(self.g, other.g), diff(self.b, other.b))
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r as i32, g as i32, b as i32)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r as i32, g as i32, b as i32)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Parse `#rrggbb`, `rrggbb` or a comma-separated `r,g,b` triple.
///
/// ```
/// use colorcut_core::Rgb;
///
/// assert_eq!("#ff8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
/// assert_eq!("12, 34, 56".parse::<Rgb>().unwrap(), Rgb::new(12, 34, 56));
/// ```
impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains(',') {
            let parts: Vec<&str> = s.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(Error::InvalidColor(s.to_string()));
            }
            let mut channels = [0i32; 3];
            for (slot, part) in channels.iter_mut().zip(&parts) {
                *slot = part
                    .parse()
                    .map_err(|_| Error::InvalidColor(s.to_string()))?;
            }
            return Ok(Rgb::new(channels[0], channels[1], channels[2]));
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            i32::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Check whether `sample` lies within `deviation` of `target` on every
/// channel.
///
/// Total for every input. A negative deviation describes an empty
/// interval, so nothing matches.
#[inline]
pub fn color_matches(target: Rgb, deviation: i32, sample: Rgb) -> bool {
    let (dr, dg, db) = target.deviation_from(sample);
    let deviation = deviation as i64;
    let within = |d: i64| -deviation <= d && d <= deviation;
    within(dr) && within(dg) && within(db)
}

/// Color predicate bound to a target color and tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMatcher {
    target: Rgb,
    deviation: i32,
}

impl ColorMatcher {
    /// Create a matcher for `target` with a symmetric per-channel tolerance.
    pub fn new(target: Rgb, deviation: i32) -> Self {
        Self { target, deviation }
    }

    /// Target color
    pub fn target(&self) -> Rgb {
        self.target
    }

    /// Per-channel tolerance
    pub fn deviation(&self) -> i32 {
        self.deviation
    }

    /// Check a sample against the target.
    #[inline]
    pub fn matches(&self, sample: Rgb) -> bool {
        color_matches(self.target, self.deviation, sample)
    }

    /// Check raw 8-bit channels against the target.
    #[inline]
    pub fn matches_rgb8(&self, r: u8, g: u8, b: u8) -> bool {
        self.matches(Rgb::from((r, g, b)))
    }
}
