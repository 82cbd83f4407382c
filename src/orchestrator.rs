//! Analysis orchestration state machine
//!
//! Sequences device readiness checks, synchronous frame capture, the
//! fixed-window audio recording, and the service round trip under a strict
//! status model. Frame capture always precedes audio recording, which always
//! precedes the network call; this ordering is a hard sequencing contract.

use std::sync::Mutex;

use tokio::sync::watch;

use crate::analysis::{AnalysisBackend, AnalysisRequest, AnalysisResult};
use crate::capture::CaptureSource;

/// Fallback error message for failures that carry no detail
const GENERIC_FAILURE: &str = "analysis failed";

/// Session status, mutated only by the orchestrator
///
/// `Idle → Observing → Thinking → Result`, with an implicit return to
/// `Idle` on any failure. No state is terminal; `Result` transitions back
/// to `Observing` on the next invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Waiting for an analyze call
    Idle,
    /// Capturing the frame and recording the clip
    Observing,
    /// Waiting on the analysis service
    Thinking,
    /// A result is available
    Result,
}

/// The analysis orchestrator
///
/// Owns the session status, the current error state, and the current result
/// until superseded by the next request. Exactly one analyze cycle may be in
/// flight: re-entrant calls are rejected by the single-flight guard rather
/// than trusting the presentation layer to disable its trigger.
pub struct Orchestrator {
    source: Box<dyn CaptureSource>,
    backend: Box<dyn AnalysisBackend>,
    status: watch::Sender<SessionStatus>,
    result: Mutex<Option<AnalysisResult>>,
    error: Mutex<Option<String>>,
}

impl Orchestrator {
    /// Create an orchestrator over a capture source and a service backend
    #[must_use]
    pub fn new(source: Box<dyn CaptureSource>, backend: Box<dyn AnalysisBackend>) -> Self {
        let (status, _) = watch::channel(SessionStatus::Idle);
        Self {
            source,
            backend,
            status,
            result: Mutex::new(None),
            error: Mutex::new(None),
        }
    }

    /// Current session status
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Subscribe to live status transitions
    #[must_use]
    pub fn watch_status(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Current error state, if any
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.error.lock().map(|slot| slot.clone()).unwrap_or(None)
    }

    /// Current analysis result, if any
    #[must_use]
    pub fn result(&self) -> Option<AnalysisResult> {
        self.result.lock().map(|slot| slot.clone()).unwrap_or(None)
    }

    /// Run one full analyze cycle
    ///
    /// Every failure is absorbed here: the status returns to [`SessionStatus::Idle`],
    /// the error state carries a human-readable message, and nothing
    /// propagates to the caller. The session stays usable for the next
    /// attempt; retries are always fresh, explicit calls.
    pub async fn analyze(&self, intent: &str) {
        let current = self.status();
        if !matches!(current, SessionStatus::Idle | SessionStatus::Result) {
            tracing::warn!(status = ?current, "analyze rejected, a cycle is already in flight");
            return;
        }

        let intent = intent.trim();
        if intent.is_empty() {
            self.fail_validation("intent is required");
            return;
        }
        if !self.source.is_ready() {
            self.fail_validation("camera not ready");
            return;
        }

        self.set_error(None);
        self.set_result(None);
        self.status.send_replace(SessionStatus::Observing);
        tracing::debug!(intent, "analyze cycle started");

        match self.run_cycle(intent).await {
            Ok(result) => {
                self.set_result(Some(result));
                self.status.send_replace(SessionStatus::Result);
                tracing::debug!("analyze cycle complete");
            }
            Err(e) => {
                let message = e.to_string();
                let message = if message.is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    message
                };
                tracing::warn!(error = %message, "analyze cycle failed");
                self.set_error(Some(message));
                self.status.send_replace(SessionStatus::Idle);
            }
        }
    }

    /// The fallible stretch of one cycle: capture, record, query
    async fn run_cycle(&self, intent: &str) -> crate::Result<AnalysisResult> {
        let frame = self.source.capture_frame()?;
        let clip = self.source.record_clip().await?;

        self.status.send_replace(SessionStatus::Thinking);

        let request = AnalysisRequest {
            intent: intent.to_string(),
            image: frame.to_data_uri(),
            audio: clip.to_data_uri(),
        };
        self.backend.analyze(&request).await
    }

    /// Precondition failure: set the error state and return to idle
    ///
    /// The prior result is left untouched; it is only cleared when a cycle
    /// actually enters `Observing`.
    fn fail_validation(&self, message: &str) {
        tracing::warn!(message, "analyze rejected");
        self.set_error(Some(message.to_string()));
        self.status.send_replace(SessionStatus::Idle);
    }

    fn set_error(&self, value: Option<String>) {
        if let Ok(mut slot) = self.error.lock() {
            *slot = value;
        }
    }

    fn set_result(&self, value: Option<AnalysisResult>) {
        if let Ok(mut slot) = self.result.lock() {
            *slot = value;
        }
    }
}
