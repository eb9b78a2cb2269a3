//! `data:` URL encoding of encoded images
//!
//! Produces and parses `data:<mime>;base64,<payload>` strings, the form a
//! browser canvas hands back from `toDataURL()`.

use crate::{IoError, IoResult, ImageFormat, detect_format_from_bytes};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Wrap encoded image bytes in a base64 `data:` URL.
///
/// `bytes` must already be encoded as `format`; nothing is re-encoded.
///
/// ```
/// use colorcut_io::{ImageFormat, encode_data_url};
///
/// let url = encode_data_url(b"\x89PNG", ImageFormat::Png);
/// assert_eq!(url, "data:image/png;base64,iVBORw==");
/// ```
pub fn encode_data_url(bytes: &[u8], format: ImageFormat) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

/// Parse a base64 `data:` URL back into its format and payload.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] when the URL is not a base64 `data:`
/// URL or its payload is not valid base64, and
/// [`IoError::UnsupportedFormat`] when the MIME type is not an image
/// format colorcut knows.
pub fn decode_data_url(url: &str) -> IoResult<(ImageFormat, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| IoError::InvalidData("missing data: scheme".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| IoError::InvalidData("data URL has no payload".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| IoError::InvalidData("data URL is not base64".to_string()))?;

    let format = ImageFormat::from_mime_type(mime)
        .ok_or_else(|| IoError::UnsupportedFormat(mime.to_string()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| IoError::InvalidData(format!("bad base64 payload: {e}")))?;
    Ok((format, bytes))
}

/// Encode an image as `format` and wrap it in a `data:` URL.
pub fn write_image_data_url(img: &colorcut_core::RgbaImage, format: ImageFormat) -> IoResult<String> {
    let bytes = crate::write_image_mem(img, format)?;
    Ok(encode_data_url(&bytes, format))
}

/// Decode an image from a `data:` URL.
///
/// The payload's magic bytes decide the decoder; a payload that
/// disagrees with its declared MIME type is rejected.
pub fn read_image_data_url(url: &str) -> IoResult<colorcut_core::RgbaImage> {
    let (declared, bytes) = decode_data_url(url)?;
    let actual = detect_format_from_bytes(&bytes)?;
    if actual != declared {
        return Err(IoError::InvalidData(format!(
            "data URL declares {} but holds {}",
            declared.mime_type(),
            actual.mime_type()
        )));
    }
    crate::read_image_mem(&bytes)
}
