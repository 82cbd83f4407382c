//! Camera track backed by nokhwa

use std::sync::{Arc, Mutex};

use image::RgbImage;
use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};

use crate::config::CameraConfig;
use crate::{Error, Result};

/// Frame rate requested from the camera (the stream is only sampled on demand)
const REQUESTED_FPS: u32 = 30;

/// The video track of an acquired device stream
pub struct CameraTrack {
    camera: Arc<Mutex<Camera>>,
}

impl CameraTrack {
    /// Open the camera at the requested resolution and start its stream
    ///
    /// # Errors
    ///
    /// Returns [`Error::PermissionDenied`] if the OS refused access, or
    /// [`Error::DeviceUnavailable`] for any other open failure.
    pub fn open(config: CameraConfig) -> Result<Self> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(config.width, config.height),
                FrameFormat::MJPEG,
                REQUESTED_FPS,
            ),
        ));

        let mut camera =
            Camera::new(CameraIndex::Index(config.index), requested).map_err(classify_error)?;

        camera.open_stream().map_err(classify_error)?;

        let resolution = camera.resolution();
        tracing::debug!(
            index = config.index,
            width = resolution.width(),
            height = resolution.height(),
            "camera track opened"
        );

        Ok(Self {
            camera: Arc::new(Mutex::new(camera)),
        })
    }

    /// Decode the current frame to RGB
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] if the stream has not produced a decodable
    /// frame yet.
    pub fn current_frame(&self) -> Result<RgbImage> {
        let mut camera = self
            .camera
            .lock()
            .map_err(|_| Error::DeviceUnavailable("camera mutex poisoned".to_string()))?;

        let buffer = camera.frame().map_err(|e| Error::NotReady(e.to_string()))?;

        buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::NotReady(e.to_string()))
    }

    /// Negotiated stream resolution
    #[must_use]
    pub fn resolution(&self) -> (u32, u32) {
        self.camera.lock().map_or((0, 0), |camera| {
            let r = camera.resolution();
            (r.width(), r.height())
        })
    }
}

impl Clone for CameraTrack {
    fn clone(&self) -> Self {
        Self {
            camera: Arc::clone(&self.camera),
        }
    }
}

/// Map a nokhwa open failure onto the device error taxonomy
///
/// OS-level permission refusal is the only expected "denied" condition;
/// everything else is an unavailable device.
fn classify_error(e: nokhwa::NokhwaError) -> Error {
    let detail = e.to_string();
    let lowered = detail.to_lowercase();
    if lowered.contains("permission") || lowered.contains("denied") || lowered.contains("access") {
        Error::PermissionDenied(detail)
    } else {
        Error::DeviceUnavailable(detail)
    }
}
