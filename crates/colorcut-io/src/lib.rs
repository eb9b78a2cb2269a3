//! colorcut-io - Image I/O for colorcut
//!
//! Decodes source images into [`RgbaImage`] and encodes crops back out.
//! Format support is feature-gated:
//!
//! | feature      | read | write |
//! |--------------|------|-------|
//! | `png-format` | yes  | yes   |
//! | `jpeg`       | yes  | yes   |
//!
//! Encoded bytes can also be carried as base64 `data:` URLs
//! ([`encode_data_url`], [`read_image_data_url`]).
//!
//! Every call allocates its own buffers; there is no shared decode
//! surface, so these functions are safe to call from many threads.

pub mod data_url;
mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use data_url::{decode_data_url, encode_data_url, read_image_data_url, write_image_data_url};
pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use colorcut_core::RgbaImage;
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path, detecting the format from its header.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, its format is not
/// recognized or enabled, or decoding fails.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<RgbaImage> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    debug!("read_image: {} as {:?}", path.display(), format);
    let reader = BufReader::new(File::open(path)?);
    read_image_format(reader, format)
}

/// Read an image from memory, detecting the format from its header.
pub fn read_image_mem(data: &[u8]) -> IoResult<RgbaImage> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<RgbaImage> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write an image to a file path.
pub fn write_image<P: AsRef<Path>>(img: &RgbaImage, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    debug!(
        "write_image: {}x{} to {} as {:?}",
        img.width(),
        img.height(),
        path.display(),
        format
    );
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(img, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory.
pub fn write_image_mem(img: &RgbaImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(img, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_format<W: Write>(img: &RgbaImage, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(img, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(img, writer, jpeg::DEFAULT_QUALITY),
        #[allow(unreachable_patterns)]
        other => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )))
        }
    }
}
