//! Error types for the Glimpse client

use thiserror::Error;

/// Result type alias for Glimpse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Glimpse client
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Device access was refused by the OS or the user
    #[error("device permission denied: {0}")]
    PermissionDenied(String),

    /// Device could not be opened (missing, busy, or failed)
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The video stream has not produced a usable frame yet
    #[error("camera not ready: {0}")]
    NotReady(String),

    /// No recording capability in this environment
    #[error("audio recording unsupported: {0}")]
    Unsupported(String),

    /// The stream handle carries no audio track
    #[error("no audio track available")]
    NoAudioTrack,

    /// Recorder could not be set up or started
    #[error("recorder init failed: {0}")]
    RecorderInit(String),

    /// Recorder failed while a recording was in progress
    #[error("recording error: {0}")]
    Recording(String),

    /// Analysis service returned a non-success status
    #[error("analysis service error {status}: {body}")]
    Service {
        /// HTTP status code returned by the service
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// Input rejected before any capture was attempted
    #[error("validation error: {0}")]
    Validation(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
