//! JPEG image format support
//!
//! Reads JPEG images with the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Grayscale, RGB and CMYK inputs are all decoded to
//! opaque RGBA. Alpha is dropped on write.

use crate::{IoError, IoResult};
use colorcut_core::RgbaImage;
use jpeg_decoder::{Decoder, PixelFormat};
use log::debug;
use std::io::{Read, Write};

/// Default JPEG quality (1-100)
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<RgbaImage> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let rgba: Vec<u8> = match info.pixel_format {
        PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        PixelFormat::L16 => pixels
            .chunks_exact(2)
            .flat_map(|s| [s[0], s[0], s[0], 255])
            .collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .flat_map(|s| [s[0], s[1], s[2], 255])
            .collect(),
        PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .flat_map(|s| {
                let k = 255 - s[3] as u32;
                let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
                [channel(s[0]), channel(s[1]), channel(s[2]), 255]
            })
            .collect(),
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    debug!("read_jpeg: {}x{} {:?}", width, height, info.pixel_format);
    Ok(RgbaImage::from_raw(width, height, rgba)?)
}

/// Write a JPEG image.
///
/// # Arguments
/// * `quality` - 1 (smallest) to 100 (best)
///
/// # Errors
///
/// JPEG dimensions are limited to 65535; larger images fail with
/// [`IoError::EncodeError`].
pub fn write_jpeg<W: Write>(img: &RgbaImage, mut writer: W, quality: u8) -> IoResult<()> {
    let (width, height) = match (u16::try_from(img.width()), u16::try_from(img.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "image too large for JPEG: {}x{}",
                img.width(),
                img.height()
            )));
        }
    };

    let mut jpeg_buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg_buf, quality.clamp(1, 100));
    encoder
        .encode(img.data(), width, height, jpeg_encoder::ColorType::Rgba)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    writer.write_all(&jpeg_buf)?;
    Ok(())
}
