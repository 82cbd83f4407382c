//! Glimpse - multimodal capture and analysis client for AI assistants
//!
//! This library provides the core functionality for the Glimpse client:
//! - Device acquisition (camera + microphone as one session stream)
//! - On-demand still-frame and fixed-window audio-clip capture
//! - Orchestration of one capture-and-query cycle against a remote
//!   analysis service
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │               Presentation (CLI / UI)                │
//! │        status  │  error  │  result  │  analyze      │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                  Orchestrator                        │
//! │   idle → observing → thinking → result              │
//! └───────┬─────────────────────────────────┬───────────┘
//!         │                                 │
//! ┌───────▼───────────────┐   ┌─────────────▼───────────┐
//! │   Capture (frame/clip) │   │   Analysis service      │
//! │   over the device      │   │   (opaque, JSON over    │
//! │   stream handle        │   │   HTTP)                 │
//! └───────────────────────┘   └─────────────────────────┘
//! ```

pub mod analysis;
pub mod capture;
pub mod config;
pub mod device;
pub mod error;
pub mod orchestrator;

pub use analysis::{AnalysisBackend, AnalysisClient, AnalysisRequest, AnalysisResult};
pub use capture::{
    AudioClip, AudioRecorder, CaptureSource, CapturedFrame, LiveCapture, RECORD_WINDOW,
};
pub use config::Config;
pub use device::{StreamHandle, StreamManager};
pub use error::{Error, Result};
pub use orchestrator::{Orchestrator, SessionStatus};
