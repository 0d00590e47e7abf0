//! Frame encoding: raw RGB8 frame to a `data:image/jpeg;base64,…` URI, the
//! shape the storage layer persists inside accounts and attendance records.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use rollcall_shared::EncodedImage;

use crate::device::Frame;
use crate::engine::CaptureError;

const JPEG_QUALITY: u8 = 80;

/// Encode a raw frame as a base64 JPEG data URI.
pub fn to_jpeg_data_uri(frame: &Frame) -> Result<EncodedImage, CaptureError> {
    let expected = frame.width as usize * frame.height as usize * 3;
    if frame.data.len() != expected {
        return Err(CaptureError::Encode(format!(
            "frame buffer is {} bytes, expected {} for {}x{} RGB8",
            frame.data.len(),
            expected,
            frame.width,
            frame.height
        )));
    }

    let img = RgbImage::from_raw(frame.width, frame.height, frame.data.to_vec())
        .ok_or_else(|| CaptureError::Encode("frame buffer rejected".to_string()))?;

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&img)
        .map_err(|e| CaptureError::Encode(e.to_string()))?;

    Ok(EncodedImage(format!(
        "data:image/jpeg;base64,{}",
        STANDARD.encode(&jpeg)
    )))
}
