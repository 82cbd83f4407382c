//! Fixed-window audio recording with codec negotiation
//!
//! One [`AudioRecorder::record`] invocation produces exactly one
//! [`AudioClip`] or one failure. The recording window is fixed and not
//! configurable by the caller; the invocation suspends for its full length.

use std::time::Duration;

use base64::Engine;

use crate::device::{SAMPLE_RATE, StreamHandle};
use crate::{Error, Result};

/// Fixed recording window per clip
pub const RECORD_WINDOW: Duration = Duration::from_millis(3000);

/// Ordered encoding preference list, most-preferred first
///
/// The trailing empty sentinel means "whatever the backend natively
/// produces", so negotiation can never fail purely on format availability.
pub const ENCODING_CANDIDATES: [&str; 5] = [
    "audio/webm;codecs=opus",
    "audio/webm",
    "audio/ogg;codecs=opus",
    "audio/mp4",
    "",
];

/// An encoded audio buffer recorded over one fixed time window
///
/// Immutable once produced; scoped to a single analysis request.
#[derive(Debug, Clone)]
pub struct AudioClip {
    data: Vec<u8>,
    mime: String,
}

impl AudioClip {
    /// Build a clip from already-encoded bytes
    #[must_use]
    pub fn new(data: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            data,
            mime: mime.into(),
        }
    }

    /// Encoded audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// MIME tag of the recorded format
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime
    }

    /// Render as a `data:<mime>;base64,…` URI for the wire schema
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.mime, encoded)
    }
}

/// Select the first supported candidate from the preference list
///
/// Returns the empty sentinel when no preferred encoding is supported; the
/// caller then defers to the backend's native format.
#[must_use]
pub fn negotiate_encoding(is_supported: impl Fn(&str) -> bool) -> &'static str {
    for candidate in ENCODING_CANDIDATES {
        if candidate.is_empty() || is_supported(candidate) {
            return candidate;
        }
    }
    // The sentinel is the last candidate, so the loop always returns.
    ""
}

/// Encodes finalized PCM samples into one clip format
pub trait ClipEncoder: Send + Sync {
    /// MIME tag of the clips this encoder produces
    fn mime_type(&self) -> &str;

    /// Encode mono samples captured at `sample_rate`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Recording`] if encoding fails.
    fn encode(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<u8>>;
}

/// WAV clip encoder, the backend's native format
pub struct WavEncoder;

impl ClipEncoder for WavEncoder {
    fn mime_type(&self) -> &str {
        "audio/wav"
    }

    fn encode(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| Error::Recording(e.to_string()))?;

            for &sample in samples {
                // Convert f32 [-1.0, 1.0] to i16
                #[allow(clippy::cast_possible_truncation)]
                let sample_i16 = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                writer
                    .write_sample(sample_i16)
                    .map_err(|e| Error::Recording(e.to_string()))?;
            }

            writer.finalize().map_err(|e| Error::Recording(e.to_string()))?;
        }

        Ok(cursor.into_inner())
    }
}

/// Records one fixed-window audio clip per invocation
///
/// The registered encoders define which preference-list candidates the
/// environment supports; the first encoder doubles as the native default
/// that the negotiation sentinel resolves to.
pub struct AudioRecorder {
    encoders: Vec<Box<dyn ClipEncoder>>,
}

impl Default for AudioRecorder {
    fn default() -> Self {
        Self::native()
    }
}

impl AudioRecorder {
    /// Recorder with the native encoder set (WAV)
    #[must_use]
    pub fn native() -> Self {
        Self::with_encoders(vec![Box::new(WavEncoder)])
    }

    /// Recorder with an explicit encoder set
    ///
    /// The first encoder is the environment default. An empty set means the
    /// environment offers no recording capability at all.
    #[must_use]
    pub fn with_encoders(encoders: Vec<Box<dyn ClipEncoder>>) -> Self {
        Self { encoders }
    }

    /// Whether an encoder is registered for `mime`
    #[must_use]
    pub fn supports(&self, mime: &str) -> bool {
        self.encoders.iter().any(|e| e.mime_type() == mime)
    }

    /// Resolve the encoder for a negotiated candidate
    ///
    /// The empty sentinel resolves to the environment default.
    fn encoder_for(&self, negotiated: &str) -> Option<&dyn ClipEncoder> {
        if negotiated.is_empty() {
            self.encoders.first().map(|e| e.as_ref())
        } else {
            self.encoders
                .iter()
                .find(|e| e.mime_type() == negotiated)
                .map(|e| e.as_ref())
        }
    }

    /// Record a clip over the fixed window from the stream's audio track
    ///
    /// Suspends the caller for the full window. Sample chunks accumulate in
    /// encounter order while the session is live; stopping finalizes them
    /// into one buffer tagged with the negotiated encoding (or the backend's
    /// native tag when negotiation fell through to the sentinel).
    ///
    /// # Errors
    ///
    /// - [`Error::Unsupported`] if no encoders are registered
    /// - [`Error::NoAudioTrack`] if the stream has no audio track
    /// - [`Error::RecorderInit`] if the capture session cannot be set up or
    ///   started, or one is already active on the track
    /// - [`Error::Recording`] if the device fails mid-recording or the clip
    ///   cannot be encoded
    pub async fn record(&self, stream: &StreamHandle) -> Result<AudioClip> {
        if self.encoders.is_empty() {
            return Err(Error::Unsupported(
                "no clip encoders registered".to_string(),
            ));
        }

        let track = stream.audio_track().ok_or(Error::NoAudioTrack)?;

        let negotiated = negotiate_encoding(|mime| self.supports(mime));
        let encoder = self
            .encoder_for(negotiated)
            .ok_or_else(|| Error::Unsupported("no clip encoders registered".to_string()))?;

        let session = track.begin_capture()?;
        tracing::debug!(
            mime = encoder.mime_type(),
            window_ms = RECORD_WINDOW.as_millis(),
            "recording started"
        );

        tokio::time::sleep(RECORD_WINDOW).await;

        let segments = session.segment_count();
        let samples = session.finish()?;
        let data = encoder.encode(&samples, track.sample_rate())?;

        tracing::info!(
            mime = encoder.mime_type(),
            segments,
            samples = samples.len(),
            bytes = data.len(),
            "clip recorded"
        );

        Ok(AudioClip {
            data,
            mime: encoder.mime_type().to_string(),
        })
    }
}

/// Sample rate clips are captured at
#[must_use]
pub const fn clip_sample_rate() -> u32 {
    SAMPLE_RATE
}
