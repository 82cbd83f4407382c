//! Analysis service request/response handling
//!
//! The remote service is an opaque collaborator: one JSON request in, one
//! structured answer out.

mod client;
mod types;

pub use client::{AnalysisBackend, AnalysisClient};
pub use types::{AnalysisRequest, AnalysisResult};
