//! Device acquisition and the session-wide stream handle
//!
//! The stream manager owns acquisition; the resulting [`StreamHandle`] is the
//! single live handle per session, shared read-only with the frame capturer
//! and the audio recorder. It is never reacquired automatically.

mod camera;
mod microphone;

pub use camera::CameraTrack;
pub use microphone::{CaptureSession, MicrophoneTrack, SAMPLE_RATE};

use std::sync::Arc;

use crate::Result;
use crate::config::Config;

/// Acquires and holds the live camera/microphone stream
pub struct StreamManager;

impl StreamManager {
    /// Acquire a combined video + audio stream from the local hardware
    ///
    /// The camera is opened at the configured target resolution and its
    /// stream started. The microphone is probed per-track: if no input
    /// device is usable the handle simply carries no audio track, and the
    /// recorder reports that at record time.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PermissionDenied`] if the OS refused camera
    /// access, or [`crate::Error::DeviceUnavailable`] for any other failure.
    pub fn acquire(config: &Config) -> Result<StreamHandle> {
        let camera = CameraTrack::open(config.camera)?;

        let microphone = match MicrophoneTrack::open() {
            Ok(track) => Some(Arc::new(track)),
            Err(e) => {
                tracing::warn!(error = %e, "no usable microphone, stream has no audio track");
                None
            }
        };

        let (width, height) = camera.resolution();
        tracing::info!(
            width,
            height,
            audio = microphone.is_some(),
            "device stream acquired"
        );

        Ok(StreamHandle { camera, microphone })
    }

    /// Wrap an already-open camera in a video-only handle (self-test paths)
    #[must_use]
    pub const fn from_camera(camera: CameraTrack) -> StreamHandle {
        StreamHandle {
            camera,
            microphone: None,
        }
    }
}

/// Live handle to an acquired audio+video device stream
///
/// Clones share the same underlying devices. Dropping the last handle
/// releases them; there is no proactive release during a session.
#[derive(Clone)]
pub struct StreamHandle {
    camera: CameraTrack,
    microphone: Option<Arc<MicrophoneTrack>>,
}

impl StreamHandle {
    /// The video track
    #[must_use]
    pub const fn camera(&self) -> &CameraTrack {
        &self.camera
    }

    /// The audio track, if the stream has one
    #[must_use]
    pub fn audio_track(&self) -> Option<&MicrophoneTrack> {
        self.microphone.as_deref()
    }

    /// Whether the stream is live and usable for capture
    #[must_use]
    pub fn is_ready(&self) -> bool {
        let (width, height) = self.camera.resolution();
        width > 0 && height > 0
    }
}
