//! Still-frame and audio-clip capture
//!
//! Each analyze cycle produces fresh captures; frames and clips are never
//! reused across requests.

mod audio;
mod frame;

pub use audio::{
    AudioClip, AudioRecorder, ClipEncoder, ENCODING_CANDIDATES, RECORD_WINDOW, WavEncoder,
    clip_sample_rate, negotiate_encoding,
};
pub use frame::{CapturedFrame, capture_frame, encode_frame};

use async_trait::async_trait;

use crate::Result;
use crate::device::StreamHandle;

/// Source of fresh captures for one analyze cycle
///
/// The seam between the orchestrator and the device layer, so the state
/// machine can be driven without audio/video hardware.
#[async_trait(?Send)]
pub trait CaptureSource {
    /// Whether the device stream is live and usable
    fn is_ready(&self) -> bool;

    /// Synchronously snapshot the current video frame
    ///
    /// # Errors
    ///
    /// Returns error if the stream has not produced a usable frame yet.
    fn capture_frame(&self) -> Result<CapturedFrame>;

    /// Record one fixed-window audio clip, suspending for the full window
    ///
    /// # Errors
    ///
    /// Returns error if the recording cannot be set up, fails mid-window, or
    /// cannot be finalized.
    async fn record_clip(&self) -> Result<AudioClip>;
}

/// Live capture source over the acquired device stream
pub struct LiveCapture {
    stream: StreamHandle,
    recorder: AudioRecorder,
}

impl LiveCapture {
    /// Wrap an acquired stream with the native recorder
    #[must_use]
    pub fn new(stream: StreamHandle) -> Self {
        Self {
            stream,
            recorder: AudioRecorder::native(),
        }
    }

    /// Wrap an acquired stream with an explicit recorder
    #[must_use]
    pub const fn with_recorder(stream: StreamHandle, recorder: AudioRecorder) -> Self {
        Self { stream, recorder }
    }
}

#[async_trait(?Send)]
impl CaptureSource for LiveCapture {
    fn is_ready(&self) -> bool {
        self.stream.is_ready()
    }

    fn capture_frame(&self) -> Result<CapturedFrame> {
        frame::capture_frame(&self.stream)
    }

    async fn record_clip(&self) -> Result<AudioClip> {
        self.recorder.record(&self.stream).await
    }
}
