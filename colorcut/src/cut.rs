//! End-to-end color line cuts
//!
//! Decode a source image, scan it for the cut line, crop, and re-encode.
//! When no line qualifies the result is `None` and the caller keeps the
//! source image as it is.
//!
//! Options are validated before the source is decoded.

use crate::error::Result;
use colorcut_core::{LineScanner, Rect, RgbaImage, ScanOptions};
use colorcut_io::ImageFormat;
use log::{debug, info};
use std::path::Path;

/// Crop an already decoded image at its cut line.
///
/// # Errors
///
/// Returns an error if the options are invalid, or if the line yields a
/// zero-area rectangle (for example `Bottom` finding row 0).
///
/// # Examples
///
/// ```
/// use colorcut::{CutDirection, Rect, RgbaImage, Rgb, ScanOptions, cut_image};
///
/// // 4x4: top half red, bottom half black
/// let mut img = RgbaImage::new(4, 4).unwrap();
/// img.fill_rect(Rect::new(0, 0, 4, 2), [255, 0, 0, 255]);
///
/// let options = ScanOptions::new()
///     .with_target(Rgb::new(0, 0, 0))
///     .with_direction(CutDirection::Top);
/// let cropped = cut_image(&img, &options).unwrap().unwrap();
/// assert_eq!((cropped.width(), cropped.height()), (4, 2));
/// ```
pub fn cut_image(img: &RgbaImage, options: &ScanOptions) -> Result<Option<RgbaImage>> {
    let scanner = LineScanner::new(options)?;
    cut_with(&scanner, img)
}

/// Find the crop rectangle of an already decoded image without cropping.
pub fn find_cut_rect(img: &RgbaImage, options: &ScanOptions) -> Result<Option<Rect>> {
    let scanner = LineScanner::new(options)?;
    Ok(scanner.scan(&img.view()).map(|line| line.rect))
}

fn cut_with(scanner: &LineScanner, img: &RgbaImage) -> Result<Option<RgbaImage>> {
    match scan(scanner, img) {
        Some(rect) => Ok(Some(img.clip_rectangle(&rect)?)),
        None => Ok(None),
    }
}

#[cfg(not(feature = "parallel"))]
fn scan(scanner: &LineScanner, img: &RgbaImage) -> Option<Rect> {
    scanner.scan(&img.view()).map(|line| line.rect)
}

#[cfg(feature = "parallel")]
fn scan(scanner: &LineScanner, img: &RgbaImage) -> Option<Rect> {
    scanner.scan_par(&img.view()).map(|line| line.rect)
}

/// Cut an image file and return the crop encoded as PNG.
///
/// # Errors
///
/// Returns an error if the options are invalid, the source cannot be
/// decoded, or the crop cannot be encoded.
pub fn cut_image_by_color_line<P: AsRef<Path>>(
    path: P,
    options: &ScanOptions,
) -> Result<Option<Vec<u8>>> {
    let scanner = LineScanner::new(options)?;
    let img = colorcut_io::read_image(path.as_ref())?;
    encode_cut(&scanner, &img)
}

/// Cut an in-memory encoded image and return the crop encoded as PNG.
pub fn cut_image_bytes_by_color_line(
    data: &[u8],
    options: &ScanOptions,
) -> Result<Option<Vec<u8>>> {
    let scanner = LineScanner::new(options)?;
    let img = colorcut_io::read_image_mem(data)?;
    encode_cut(&scanner, &img)
}

fn encode_cut(scanner: &LineScanner, img: &RgbaImage) -> Result<Option<Vec<u8>>> {
    match cut_with(scanner, img)? {
        Some(cropped) => Ok(Some(colorcut_io::write_image_mem(
            &cropped,
            ImageFormat::Png,
        )?)),
        None => Ok(None),
    }
}

/// Cut an image file and return the crop as a `data:image/png;base64,...`
/// URL.
///
/// This is the string form a browser canvas produces with `toDataURL()`.
/// `None` means no line qualified.
pub fn cut_image_to_data_url<P: AsRef<Path>>(
    path: P,
    options: &ScanOptions,
) -> Result<Option<String>> {
    Ok(cut_image_by_color_line(path, options)?
        .map(|png| colorcut_io::encode_data_url(&png, ImageFormat::Png)))
}

/// Cut an in-memory encoded image and return the crop as a PNG `data:` URL.
pub fn cut_image_bytes_to_data_url(data: &[u8], options: &ScanOptions) -> Result<Option<String>> {
    Ok(cut_image_bytes_by_color_line(data, options)?
        .map(|png| colorcut_io::encode_data_url(&png, ImageFormat::Png)))
}

/// Cut `input` and write the crop to `output`.
///
/// The output format follows `output`'s extension and falls back to PNG.
/// Returns the crop rectangle, or `None` (with nothing written) when no
/// line qualifies.
pub fn cut_image_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ScanOptions,
) -> Result<Option<Rect>> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let scanner = LineScanner::new(options)?;
    let img = colorcut_io::read_image(input)?;

    let Some(rect) = scan(&scanner, &img) else {
        info!("{}: no cut line, leaving image unchanged", input.display());
        return Ok(None);
    };

    let cropped = img.clip_rectangle(&rect)?;
    let format = ImageFormat::from_path(output).unwrap_or_default();
    colorcut_io::write_image(&cropped, output, format)?;
    debug!(
        "{}: cut to {:?}, wrote {}",
        input.display(),
        rect,
        output.display()
    );
    Ok(Some(rect))
}
