//! Microphone track and recording-scoped capture sessions

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};

use crate::{Error, Result};

/// Sample rate for audio capture (16kHz for speech)
pub const SAMPLE_RATE: u32 = 16000;

/// The audio track of an acquired device stream
///
/// Holds the probed input device and stream config. Actual capture happens in
/// short-lived [`CaptureSession`]s scoped to one recording invocation; the
/// track refuses overlapping sessions.
pub struct MicrophoneTrack {
    device: Device,
    config: StreamConfig,
    in_use: Arc<AtomicBool>,
}

impl MicrophoneTrack {
    /// Probe the default input device for a speech-rate mono config
    ///
    /// # Errors
    ///
    /// Returns error if there is no input device or no suitable config
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| Error::DeviceUnavailable("no input device available".to_string()))?;

        let supported_config = device
            .supported_input_configs()
            .map_err(|e| Error::DeviceUnavailable(e.to_string()))?
            .find(|c| {
                c.channels() == 1
                    && c.min_sample_rate() <= SampleRate(SAMPLE_RATE)
                    && c.max_sample_rate() >= SampleRate(SAMPLE_RATE)
            })
            .ok_or_else(|| {
                Error::DeviceUnavailable("no suitable audio config found".to_string())
            })?;

        let config = supported_config
            .with_sample_rate(SampleRate(SAMPLE_RATE))
            .config();

        tracing::debug!(
            device = device.name().unwrap_or_default(),
            sample_rate = SAMPLE_RATE,
            channels = config.channels,
            "microphone track opened"
        );

        Ok(Self {
            device,
            config,
            in_use: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Start a recording-scoped capture session against this track
    ///
    /// Sample chunks accumulate in encounter order until [`CaptureSession::finish`]
    /// is called. Only one session may be active per track.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecorderInit`] if a session is already active or the
    /// input stream cannot be built or started.
    pub fn begin_capture(&self) -> Result<CaptureSession> {
        if self.in_use.swap(true, Ordering::SeqCst) {
            return Err(Error::RecorderInit(
                "a recording is already in progress on this track".to_string(),
            ));
        }

        let segments = Arc::new(Mutex::new(Vec::new()));
        let error = Arc::new(Mutex::new(None));

        let segments_cb = Arc::clone(&segments);
        let error_cb = Arc::clone(&error);

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if data.is_empty() {
                        return;
                    }
                    if let Ok(mut segs) = segments_cb.lock() {
                        segs.push(data.to_vec());
                    }
                },
                move |err| {
                    tracing::error!(error = %err, "audio capture error");
                    if let Ok(mut slot) = error_cb.lock() {
                        slot.get_or_insert_with(|| err.to_string());
                    }
                },
                None,
            )
            .map_err(|e| {
                self.in_use.store(false, Ordering::SeqCst);
                Error::RecorderInit(e.to_string())
            })?;

        stream.play().map_err(|e| {
            self.in_use.store(false, Ordering::SeqCst);
            Error::RecorderInit(e.to_string())
        })?;

        tracing::debug!("capture session started");

        Ok(CaptureSession {
            stream: Some(stream),
            segments,
            error,
            in_use: Arc::clone(&self.in_use),
        })
    }

    /// Sample rate of this track
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }
}

/// An active capture session on a microphone track
///
/// Dropping the session stops the underlying stream and releases the track.
pub struct CaptureSession {
    stream: Option<Stream>,
    segments: Arc<Mutex<Vec<Vec<f32>>>>,
    error: Arc<Mutex<Option<String>>>,
    in_use: Arc<AtomicBool>,
}

impl CaptureSession {
    /// Stop the session and return the accumulated samples in encounter order
    ///
    /// # Errors
    ///
    /// Returns [`Error::Recording`] if the device reported an asynchronous
    /// error during the session.
    pub fn finish(mut self) -> Result<Vec<f32>> {
        if let Some(stream) = self.stream.take() {
            drop(stream);
        }

        if let Ok(slot) = self.error.lock()
            && let Some(detail) = slot.as_ref()
        {
            return Err(Error::Recording(detail.clone()));
        }

        let samples: Vec<f32> = self
            .segments
            .lock()
            .map(|mut segs| std::mem::take(&mut *segs))
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect();

        tracing::debug!(samples = samples.len(), "capture session finished");
        Ok(samples)
    }

    /// Number of sample chunks emitted so far
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.lock().map(|segs| segs.len()).unwrap_or(0)
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            drop(stream);
        }
        self.in_use.store(false, Ordering::SeqCst);
    }
}
