//! PNG image format support
//!
//! Every PNG color type is decoded to 8-bit RGBA: palettes and low bit
//! depths are expanded, 16-bit samples keep their high byte, grayscale is
//! replicated across R, G and B. Images are always written as 8-bit RGBA.

use crate::{IoError, IoResult};
use colorcut_core::RgbaImage;
use log::debug;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<RgbaImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let (color_type, bit_depth) = reader.output_color_type();

    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?} {:?}",
            color_type, bit_depth
        )));
    }

    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    // Read image data
    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..][..width as usize * samples];
        for px in row.chunks_exact(samples) {
            let pixel = match samples {
                1 => [px[0], px[0], px[0], 255],
                2 => [px[0], px[0], px[0], px[1]],
                3 => [px[0], px[1], px[2], 255],
                _ => [px[0], px[1], px[2], px[3]],
            };
            rgba.extend_from_slice(&pixel);
        }
    }

    debug!("read_png: {}x{} {:?}", width, height, color_type);
    Ok(RgbaImage::from_raw(width, height, rgba)?)
}

/// Write a PNG image as 8-bit RGBA
pub fn write_png<W: Write>(img: &RgbaImage, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, img.width(), img.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(img.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_raw(width: u32, height: u32, color: ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_png_roundtrip_rgba() {
        let mut img = RgbaImage::new(5, 5).unwrap();
        img.set_rgba(0, 0, [255, 0, 0, 255]).unwrap();
        img.set_rgba(1, 1, [0, 255, 0, 128]).unwrap();
        img.set_rgba(4, 4, [0, 0, 255, 0]).unwrap();

        let mut buffer = Vec::new();
        write_png(&img, &mut buffer).unwrap();
        let img2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(img2, img);
    }

    #[test]
    fn test_read_grayscale_expands_to_rgb() {
        let bytes = encode_raw(2, 1, ColorType::Grayscale, &[0, 200]);
        let img = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(img.get_rgba(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(img.get_rgba(1, 0), Some([200, 200, 200, 255]));
    }

    #[test]
    fn test_read_rgb_adds_opaque_alpha() {
        let bytes = encode_raw(1, 2, ColorType::Rgb, &[1, 2, 3, 4, 5, 6]);
        let img = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(img.get_rgba(0, 0), Some([1, 2, 3, 255]));
        assert_eq!(img.get_rgba(0, 1), Some([4, 5, 6, 255]));
    }

    #[test]
    fn test_read_garbage_fails() {
        let err = read_png(Cursor::new(b"not a png at all".to_vec())).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
