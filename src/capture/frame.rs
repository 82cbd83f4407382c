//! Still-frame capture from the live video track

use std::io::Cursor;

use base64::Engine;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;

use crate::device::StreamHandle;
use crate::{Error, Result};

/// JPEG quality factor for captured frames (0-100 scale)
const JPEG_QUALITY: u8 = 85;

/// A single encoded still image derived from the video stream
///
/// Immutable once produced; scoped to a single analysis request.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl CapturedFrame {
    /// Encoded JPEG bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel dimensions at capture time
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Render as a `data:image/jpeg;base64,…` URI for the wire schema
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:image/jpeg;base64,{encoded}")
    }
}

/// Snapshot the current video frame as a JPEG
///
/// Synchronous and non-suspending: the frame is drawn into a transient
/// buffer sized to the video's native dimensions and encoded at a fixed
/// quality factor.
///
/// # Errors
///
/// Returns [`Error::NotReady`] if the stream has not produced a usable
/// frame yet.
pub fn capture_frame(stream: &StreamHandle) -> Result<CapturedFrame> {
    let image = stream.camera().current_frame()?;
    encode_frame(&image)
}

/// Encode an RGB frame as a JPEG at the fixed quality factor
///
/// A frame with zero dimensions means the stream was marked ready before it
/// decoded its first frame; that race is reported as not-ready rather than
/// producing a degenerate image.
///
/// # Errors
///
/// Returns [`Error::NotReady`] on zero dimensions or an encoding failure.
pub fn encode_frame(image: &RgbImage) -> Result<CapturedFrame> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::NotReady(
            "video stream has zero dimensions".to_string(),
        ));
    }

    let mut cursor = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
    image
        .write_with_encoder(encoder)
        .map_err(|e| Error::NotReady(format!("failed to encode frame: {e}")))?;

    let data = cursor.into_inner();
    tracing::debug!(width, height, bytes = data.len(), "frame captured");

    Ok(CapturedFrame {
        data,
        width,
        height,
    })
}
