//! Color line scanning
//!
//! Sweeps the rows or columns of an image from one edge, measures the
//! percentage of pixels on each line that match a target color, and stops
//! at the first line whose percentage passes the threshold policy. The
//! found line is turned into the crop rectangle for that edge.
//!
//! # Algorithm
//!
//! 1. The [`CutDirection`] picks the swept axis and the scan order:
//!    `Top`/`Bottom` sweep rows (counting across the full width),
//!    `Left`/`Right` sweep columns (counting across the full height).
//!    `Top`/`Left` run from index 0 upward, `Bottom`/`Right` from the last
//!    index downward.
//! 2. For each line, `percent = matches / extent * 100`.
//! 3. The [`ThresholdPolicy`] compares: OVER policies accept
//!    `percent > threshold`, UNDER policies accept `percent < threshold`.
//! 4. The first accepted line in scan order yields the rectangle:
//!
//! | direction | rectangle                  |
//! |-----------|----------------------------|
//! | `Top`     | `(0, i, width, height - i)` |
//! | `Bottom`  | `(0, 0, width, i)`          |
//! | `Left`    | `(i, 0, width - i, height)` |
//! | `Right`   | `(0, 0, i, height)`         |

use crate::color::{ColorMatcher, Rgb};
use crate::error::{Error, Result};
use crate::image::PixelView;
use crate::rect::Rect;
use log::{debug, trace};
use std::fmt;
use std::str::FromStr;

/// Axis swept by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Lines are rows; percentages count across the width
    Rows,
    /// Lines are columns; percentages count across the height
    Columns,
}

/// Edge a scan starts from.
///
/// Integer codes 0..=3 are accepted through `TryFrom<i32>`, in the order
/// `Top`, `Bottom`, `Left`, `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CutDirection {
    /// Scan rows from the top edge downward
    #[default]
    Top,
    /// Scan rows from the bottom edge upward
    Bottom,
    /// Scan columns from the left edge rightward
    Left,
    /// Scan columns from the right edge leftward
    Right,
}

impl CutDirection {
    /// All directions, in integer-code order
    pub const ALL: [CutDirection; 4] = [
        CutDirection::Top,
        CutDirection::Bottom,
        CutDirection::Left,
        CutDirection::Right,
    ];

    /// Axis swept by this direction.
    pub fn axis(self) -> Axis {
        match self {
            CutDirection::Top | CutDirection::Bottom => Axis::Rows,
            CutDirection::Left | CutDirection::Right => Axis::Columns,
        }
    }

    /// Whether the scan runs from the last index toward 0.
    pub fn is_reversed(self) -> bool {
        matches!(self, CutDirection::Bottom | CutDirection::Right)
    }

    /// Number of lines swept in a `width` x `height` image.
    pub fn line_count(self, width: u32, height: u32) -> u32 {
        match self.axis() {
            Axis::Rows => height,
            Axis::Columns => width,
        }
    }

    /// Number of pixels on each line of a `width` x `height` image.
    pub fn line_length(self, width: u32, height: u32) -> u32 {
        match self.axis() {
            Axis::Rows => width,
            Axis::Columns => height,
        }
    }

    /// Line indices in scan order.
    pub fn scan_order(self, line_count: u32) -> impl Iterator<Item = u32> {
        let reversed = self.is_reversed();
        (0..line_count).map(move |k| if reversed { line_count - 1 - k } else { k })
    }

    /// Crop rectangle for a cut at line `index`.
    ///
    /// `Right` keeps the columns left of the found one, `(0, 0, i, height)`.
    pub fn crop_rect(self, index: u32, width: u32, height: u32) -> Rect {
        match self {
            CutDirection::Top => Rect::new(0, index, width, height - index),
            CutDirection::Bottom => Rect::new(0, 0, width, index),
            CutDirection::Left => Rect::new(index, 0, width - index, height),
            CutDirection::Right => Rect::new(0, 0, index, height),
        }
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            CutDirection::Top => "top",
            CutDirection::Bottom => "bottom",
            CutDirection::Left => "left",
            CutDirection::Right => "right",
        }
    }
}

impl TryFrom<i32> for CutDirection {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(CutDirection::Top),
            1 => Ok(CutDirection::Bottom),
            2 => Ok(CutDirection::Left),
            3 => Ok(CutDirection::Right),
            _ => Err(Error::InvalidDirection(code)),
        }
    }
}

impl FromStr for CutDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(CutDirection::Top),
            "bottom" | "bot" => Ok(CutDirection::Bottom),
            "left" => Ok(CutDirection::Left),
            "right" => Ok(CutDirection::Right),
            other => Err(Error::InvalidParameter(format!(
                "unknown cut direction: {other}"
            ))),
        }
    }
}

impl fmt::Display for CutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule deciding whether a line's match percentage makes it the cut line.
///
/// Both OVER variants compare with `>` and both UNDER variants with `<`.
/// FIRST/LAST only records the caller's intent; which line is found
/// depends on the scan order of the [`CutDirection`] paired with it.
///
/// Integer codes 0..=3 are accepted through `TryFrom<i32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThresholdPolicy {
    /// First line whose percentage is over the threshold
    #[default]
    FirstLineOver,
    /// First line whose percentage is under the threshold
    FirstLineUnder,
    /// Last line whose percentage is over the threshold
    LastLineOver,
    /// Last line whose percentage is under the threshold
    LastLineUnder,
}

impl ThresholdPolicy {
    /// All policies, in integer-code order
    pub const ALL: [ThresholdPolicy; 4] = [
        ThresholdPolicy::FirstLineOver,
        ThresholdPolicy::FirstLineUnder,
        ThresholdPolicy::LastLineOver,
        ThresholdPolicy::LastLineUnder,
    ];

    /// Whether the policy accepts percentages above the threshold.
    pub fn is_over(self) -> bool {
        matches!(
            self,
            ThresholdPolicy::FirstLineOver | ThresholdPolicy::LastLineOver
        )
    }

    /// Compare a line percentage against the threshold.
    #[inline]
    pub fn accepts(self, percent: f64, threshold: f64) -> bool {
        if self.is_over() {
            percent > threshold
        } else {
            percent < threshold
        }
    }

    /// Kebab-case name
    pub fn as_str(self) -> &'static str {
        match self {
            ThresholdPolicy::FirstLineOver => "first-over",
            ThresholdPolicy::FirstLineUnder => "first-under",
            ThresholdPolicy::LastLineOver => "last-over",
            ThresholdPolicy::LastLineUnder => "last-under",
        }
    }
}

impl TryFrom<i32> for ThresholdPolicy {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(ThresholdPolicy::FirstLineOver),
            1 => Ok(ThresholdPolicy::FirstLineUnder),
            2 => Ok(ThresholdPolicy::LastLineOver),
            3 => Ok(ThresholdPolicy::LastLineUnder),
            _ => Err(Error::InvalidPolicy(code)),
        }
    }
}

impl FromStr for ThresholdPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "first-over" => Ok(ThresholdPolicy::FirstLineOver),
            "first-under" => Ok(ThresholdPolicy::FirstLineUnder),
            "last-over" => Ok(ThresholdPolicy::LastLineOver),
            "last-under" => Ok(ThresholdPolicy::LastLineUnder),
            other => Err(Error::InvalidParameter(format!(
                "unknown threshold policy: {other}"
            ))),
        }
    }
}

impl fmt::Display for ThresholdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a color line scan
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    /// Color to look for (default: black)
    pub target: Rgb,

    /// Per-channel tolerance, must be >= 0 (default: 0)
    pub deviation: i32,

    /// Percentage threshold (default: 50.0)
    ///
    /// Values outside [0, 100] are allowed: over 100 never fires with an
    /// OVER policy, under 0 never fires with an UNDER policy.
    pub threshold_percent: f64,

    /// Edge to scan from (default: top)
    pub direction: CutDirection,

    /// Threshold comparison (default: first line over)
    pub policy: ThresholdPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            target: Rgb::BLACK,
            deviation: 0,
            threshold_percent: 50.0,
            direction: CutDirection::Top,
            policy: ThresholdPolicy::FirstLineOver,
        }
    }
}

impl ScanOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target color
    pub fn with_target(mut self, target: Rgb) -> Self {
        self.target = target;
        self
    }

    /// Set the per-channel deviation
    pub fn with_deviation(mut self, deviation: i32) -> Self {
        self.deviation = deviation;
        self
    }

    /// Set the percentage threshold
    pub fn with_threshold(mut self, threshold_percent: f64) -> Self {
        self.threshold_percent = threshold_percent;
        self
    }

    /// Set the scan direction
    pub fn with_direction(mut self, direction: CutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the threshold policy
    pub fn with_policy(mut self, policy: ThresholdPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate options
    pub fn validate(&self) -> Result<()> {
        if self.deviation < 0 {
            return Err(Error::InvalidParameter(format!(
                "deviation must be >= 0, got {}",
                self.deviation
            )));
        }
        if !self.threshold_percent.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "threshold_percent must be finite, got {}",
                self.threshold_percent
            )));
        }
        Ok(())
    }
}

/// A line that satisfied the threshold policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMatch {
    /// Row (Top/Bottom) or column (Left/Right) index of the found line
    pub index: u32,
    /// Match percentage of the found line
    pub percent: f64,
    /// Crop rectangle derived from the line
    pub rect: Rect,
}

/// Validated scanner, reusable across images.
#[derive(Debug, Clone)]
pub struct LineScanner {
    matcher: ColorMatcher,
    threshold: f64,
    direction: CutDirection,
    policy: ThresholdPolicy,
}

impl LineScanner {
    /// Build a scanner from options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the options fail
    /// [`ScanOptions::validate`].
    pub fn new(options: &ScanOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            matcher: ColorMatcher::new(options.target, options.deviation),
            threshold: options.threshold_percent,
            direction: options.direction,
            policy: options.policy,
        })
    }

    /// Color predicate used for counting
    pub fn matcher(&self) -> &ColorMatcher {
        &self.matcher
    }

    /// Scan direction
    pub fn direction(&self) -> CutDirection {
        self.direction
    }

    /// Threshold policy
    pub fn policy(&self) -> ThresholdPolicy {
        self.policy
    }

    /// Match percentage of line `index`, or `None` past the last line.
    pub fn line_percent(&self, view: &PixelView<'_>, index: u32) -> Option<f64> {
        let (w, h) = (view.width(), view.height());
        if index >= self.direction.line_count(w, h) {
            return None;
        }
        Some(self.line_percent_unchecked(view, index))
    }

    /// Match percentages of every line, in scan order.
    pub fn line_percentages(&self, view: &PixelView<'_>) -> Vec<f64> {
        let lines = self.direction.line_count(view.width(), view.height());
        self.direction
            .scan_order(lines)
            .map(|i| self.line_percent_unchecked(view, i))
            .collect()
    }

    /// Find the first line in scan order accepted by the policy.
    ///
    /// Returns `None` when no line qualifies; callers then leave the
    /// image untouched.
    pub fn scan(&self, view: &PixelView<'_>) -> Option<LineMatch> {
        let (w, h) = (view.width(), view.height());
        debug!(
            "LineScanner::scan {}x{} direction={} policy={} target={} deviation={} threshold={}",
            w,
            h,
            self.direction,
            self.policy,
            self.matcher.target(),
            self.matcher.deviation(),
            self.threshold
        );

        let lines = self.direction.line_count(w, h);
        let found = self.direction.scan_order(lines).find_map(|i| {
            let percent = self.line_percent_unchecked(view, i);
            trace!("line {i}: {percent:.2}%");
            self.policy
                .accepts(percent, self.threshold)
                .then_some((i, percent))
        });

        self.finish(found, w, h)
    }

    /// Parallel version of [`LineScanner::scan`].
    ///
    /// Lines are measured concurrently; among all qualifying lines the one
    /// earliest in scan order wins, so the result always equals `scan`.
    #[cfg(feature = "parallel")]
    pub fn scan_par(&self, view: &PixelView<'_>) -> Option<LineMatch> {
        use rayon::prelude::*;

        let (w, h) = (view.width(), view.height());
        let order: Vec<u32> = self.direction.scan_order(self.direction.line_count(w, h)).collect();
        let found = order
            .par_iter()
            .map(|&i| (i, self.line_percent_unchecked(view, i)))
            .find_first(|&(_, percent)| self.policy.accepts(percent, self.threshold));

        self.finish(found, w, h)
    }

    fn finish(&self, found: Option<(u32, f64)>, w: u32, h: u32) -> Option<LineMatch> {
        match found {
            Some((index, percent)) => {
                let rect = self.direction.crop_rect(index, w, h);
                debug!(
                    "LineScanner::scan found line {} ({:.2}%), rect {:?}",
                    index, percent, rect
                );
                Some(LineMatch {
                    index,
                    percent,
                    rect,
                })
            }
            None => {
                debug!("LineScanner::scan no line satisfied the policy");
                None
            }
        }
    }

    fn line_percent_unchecked(&self, view: &PixelView<'_>, index: u32) -> f64 {
        let (w, h) = (view.width(), view.height());
        let length = self.direction.line_length(w, h);
        let count = match self.direction.axis() {
            Axis::Rows => (0..w)
                .filter(|&x| self.matches_at(view, x, index))
                .count(),
            Axis::Columns => (0..h)
                .filter(|&y| self.matches_at(view, index, y))
                .count(),
        };
        (count as f64 / length as f64) * 100.0
    }

    #[inline]
    fn matches_at(&self, view: &PixelView<'_>, x: u32, y: u32) -> bool {
        let (r, g, b) = view.get_rgb_unchecked(x, y);
        self.matcher.matches_rgb8(r, g, b)
    }
}

/// Validate `options` and scan `view` once.
///
/// # Errors
///
/// Returns an error if the options are invalid. Not finding a line is
/// `Ok(None)`.
///
/// # Examples
///
/// ```
/// use colorcut_core::{CutDirection, PixelView, Rect, Rgb, ScanOptions, find_line};
///
/// // 1x4 RGB column: red, red, black, black
/// let data = [255, 0, 0, 255, 0, 0, 0, 0, 0, 0, 0, 0];
/// let view = PixelView::rgb(&data, 1, 4).unwrap();
/// let options = ScanOptions::new()
///     .with_target(Rgb::new(255, 0, 0))
///     .with_direction(CutDirection::Bottom);
/// let line = find_line(&view, &options).unwrap().unwrap();
/// assert_eq!(line.index, 1);
/// assert_eq!(line.rect, Rect::new(0, 0, 1, 1));
/// ```
pub fn find_line(view: &PixelView<'_>, options: &ScanOptions) -> Result<Option<LineMatch>> {
    Ok(LineScanner::new(options)?.scan(view))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x4 RGBA: rows 0-1 red, rows 2-3 black
    fn red_over_black() -> Vec<u8> {
        let mut data = Vec::with_capacity(64);
        for y in 0..4 {
            for _ in 0..4 {
                if y < 2 {
                    data.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    data.extend_from_slice(&[0, 0, 0, 255]);
                }
            }
        }
        data
    }

    fn red_options(direction: CutDirection) -> ScanOptions {
        ScanOptions::new()
            .with_target(Rgb::new(255, 0, 0))
            .with_direction(direction)
    }

    #[test]
    fn test_direction_codes() {
        for (code, dir) in CutDirection::ALL.iter().enumerate() {
            assert_eq!(CutDirection::try_from(code as i32).unwrap(), *dir);
        }
        assert_eq!(
            CutDirection::try_from(4).unwrap_err(),
            Error::InvalidDirection(4)
        );
        assert!(CutDirection::try_from(-1).is_err());
    }

    #[test]
    fn test_policy_codes() {
        for (code, policy) in ThresholdPolicy::ALL.iter().enumerate() {
            assert_eq!(ThresholdPolicy::try_from(code as i32).unwrap(), *policy);
        }
        assert_eq!(
            ThresholdPolicy::try_from(7).unwrap_err(),
            Error::InvalidPolicy(7)
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Bottom".parse::<CutDirection>().unwrap(), CutDirection::Bottom);
        assert_eq!(
            "last_under".parse::<ThresholdPolicy>().unwrap(),
            ThresholdPolicy::LastLineUnder
        );
        assert!("diagonal".parse::<CutDirection>().is_err());
        for policy in ThresholdPolicy::ALL {
            assert_eq!(policy.as_str().parse::<ThresholdPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_first_last_share_comparison() {
        assert!(ThresholdPolicy::FirstLineOver.accepts(51.0, 50.0));
        assert!(ThresholdPolicy::LastLineOver.accepts(51.0, 50.0));
        assert!(!ThresholdPolicy::FirstLineOver.accepts(50.0, 50.0));
        assert!(ThresholdPolicy::FirstLineUnder.accepts(49.0, 50.0));
        assert!(ThresholdPolicy::LastLineUnder.accepts(49.0, 50.0));
        assert!(!ThresholdPolicy::LastLineUnder.accepts(50.0, 50.0));
    }

    #[test]
    fn test_scan_order() {
        let fwd: Vec<u32> = CutDirection::Left.scan_order(3).collect();
        let rev: Vec<u32> = CutDirection::Right.scan_order(3).collect();
        assert_eq!(fwd, vec![0, 1, 2]);
        assert_eq!(rev, vec![2, 1, 0]);
        assert_eq!(CutDirection::Bottom.scan_order(0).count(), 0);
    }

    #[test]
    fn test_crop_rect_per_direction() {
        assert_eq!(CutDirection::Top.crop_rect(3, 10, 8), Rect::new(0, 3, 10, 5));
        assert_eq!(CutDirection::Bottom.crop_rect(3, 10, 8), Rect::new(0, 0, 10, 3));
        assert_eq!(CutDirection::Left.crop_rect(3, 10, 8), Rect::new(3, 0, 7, 8));
        assert_eq!(CutDirection::Right.crop_rect(3, 10, 8), Rect::new(0, 0, 3, 8));
    }

    #[test]
    fn test_top_first_over() {
        let data = red_over_black();
        let view = PixelView::rgba(&data, 4, 4).unwrap();
        let scanner = LineScanner::new(&red_options(CutDirection::Top)).unwrap();
        assert_eq!(scanner.line_percentages(&view), vec![100.0, 100.0, 0.0, 0.0]);
        let line = scanner.scan(&view).unwrap();
        assert_eq!(line.index, 0);
        assert_eq!(line.rect, Rect::new(0, 0, 4, 4));
    }

    #[test]
    fn test_bottom_first_over() {
        let data = red_over_black();
        let view = PixelView::rgba(&data, 4, 4).unwrap();
        let scanner = LineScanner::new(&red_options(CutDirection::Bottom)).unwrap();
        assert_eq!(scanner.line_percentages(&view), vec![0.0, 0.0, 100.0, 100.0]);
        let line = scanner.scan(&view).unwrap();
        assert_eq!(line.index, 1);
        assert_eq!(line.rect, Rect::new(0, 0, 4, 1));
    }

    #[test]
    fn test_unreachable_threshold() {
        let data = red_over_black();
        let view = PixelView::rgba(&data, 4, 4).unwrap();
        for direction in CutDirection::ALL {
            for policy in [ThresholdPolicy::FirstLineOver, ThresholdPolicy::LastLineOver] {
                let options = red_options(direction)
                    .with_threshold(150.0)
                    .with_policy(policy);
                assert_eq!(find_line(&view, &options).unwrap(), None);
            }
        }
    }

    #[test]
    fn test_columns_count_full_height() {
        let data = red_over_black();
        let view = PixelView::rgba(&data, 4, 4).unwrap();
        let scanner = LineScanner::new(&red_options(CutDirection::Left)).unwrap();
        assert_eq!(scanner.line_percent(&view, 0), Some(50.0));
        assert_eq!(scanner.line_percent(&view, 4), None);
        // 50% is not over 50%
        assert_eq!(scanner.scan(&view), None);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let negative = ScanOptions::new().with_deviation(-1);
        assert!(matches!(
            LineScanner::new(&negative),
            Err(Error::InvalidParameter(_))
        ));
        let nan = ScanOptions::new().with_threshold(f64::NAN);
        assert!(LineScanner::new(&nan).is_err());
        let inf = ScanOptions::new().with_threshold(f64::INFINITY);
        assert!(inf.validate().is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_scan_par_matches_scan() {
        let data = red_over_black();
        let view = PixelView::rgba(&data, 4, 4).unwrap();
        for direction in CutDirection::ALL {
            for policy in ThresholdPolicy::ALL {
                for threshold in [0.0, 25.0, 50.0, 99.0, 150.0] {
                    let options = red_options(direction)
                        .with_policy(policy)
                        .with_threshold(threshold);
                    let scanner = LineScanner::new(&options).unwrap();
                    assert_eq!(scanner.scan_par(&view), scanner.scan(&view));
                }
            }
        }
    }
}
