//! Image encoding helpers and data URLs.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use stackscope_protocols::CaptureError;

/// Wrap encoded image bytes in a `data:` URL, sniffing the format.
pub fn data_url(bytes: &[u8]) -> String {
    let mime = image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("image/png");
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode the payload of a base64 `data:` URL.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, CaptureError> {
    let payload = url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, payload)| payload)
        .ok_or_else(|| CaptureError::Image("not a base64 data URL".to_string()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| CaptureError::Image(format!("Failed to decode data URL: {}", e)))
}

/// Encode image bytes in the format named by `path`'s extension.
///
/// Bytes already in that format are returned unchanged. Unknown extensions
/// get JPEG at `jpeg_quality`.
pub fn encode_for_path(bytes: &[u8], path: &Path, jpeg_quality: u8) -> Result<Vec<u8>, CaptureError> {
    let target = ImageFormat::from_path(path).unwrap_or(ImageFormat::Jpeg);
    if image::guess_format(bytes).ok() == Some(target) {
        return Ok(bytes.to_vec());
    }

    let image = image::load_from_memory(bytes)
        .map_err(|e| CaptureError::Image(format!("Failed to decode image: {}", e)))?;
    if target == ImageFormat::Jpeg {
        return jpeg_bytes(&image.to_rgb8(), jpeg_quality);
    }

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, target)
        .map_err(|e| CaptureError::Image(format!("Failed to encode image as {:?}: {}", target, e)))?;
    Ok(buffer.into_inner())
}

fn jpeg_bytes(canvas: &RgbImage, quality: u8) -> Result<Vec<u8>, CaptureError> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    canvas
        .write_with_encoder(encoder)
        .map_err(|e| CaptureError::Image(format!("Failed to encode image: {}", e)))?;
    Ok(buffer)
}

pub(crate) fn jpeg_data_url(canvas: &RgbImage, quality: u8) -> Result<String, CaptureError> {
    let buffer = jpeg_bytes(canvas, quality)?;
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&buffer)))
}
