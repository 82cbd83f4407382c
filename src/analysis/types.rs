//! Wire schema for the analysis service

use serde::{Deserialize, Serialize};

/// Multimodal request payload
///
/// Constructed fresh per invocation and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// What the user is trying to accomplish
    pub intent: String,

    /// Data-URI-encoded JPEG of the captured frame
    pub image: String,

    /// Data-URI-encoded audio clip in the recorder's negotiated MIME type
    pub audio: String,
}

/// Structured answer from the analysis service
///
/// Non-intervention responses may omit the insight-related fields; only
/// `why_it_matters` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Whether the service judged an intervention worthwhile
    pub intervention_needed: bool,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// What the service inferred the user is trying to accomplish
    #[serde(default)]
    pub inferred_goal: String,

    /// One concise observation
    #[serde(default)]
    pub insight: String,

    /// Specific next step
    #[serde(default)]
    pub suggested_action: String,

    /// Brief impact explanation (or a system note on non-intervention)
    pub why_it_matters: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_wire_field_names() {
        let request = AnalysisRequest {
            intent: "check my form".to_string(),
            image: "data:image/jpeg;base64,AA==".to_string(),
            audio: "data:audio/wav;base64,AA==".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["intent"], "check my form");
        assert!(json["image"].as_str().unwrap().starts_with("data:image/jpeg"));
        assert!(json["audio"].as_str().unwrap().starts_with("data:audio/wav"));
    }

    #[test]
    fn result_parses_full_response() {
        let body = r#"{
            "intervention_needed": true,
            "confidence": 0.92,
            "inferred_goal": "improve posture",
            "insight": "shoulders hunched",
            "suggested_action": "sit up straight",
            "why_it_matters": "reduces strain"
        }"#;

        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert!(result.intervention_needed);
        assert!((result.confidence - 0.92).abs() < f64::EPSILON);
        assert_eq!(result.inferred_goal, "improve posture");
        assert_eq!(result.insight, "shoulders hunched");
        assert_eq!(result.suggested_action, "sit up straight");
        assert_eq!(result.why_it_matters, "reduces strain");
    }

    #[test]
    fn result_parses_non_intervention_with_omitted_fields() {
        let body = r#"{
            "intervention_needed": false,
            "confidence": 0.3,
            "why_it_matters": "System uncertain, try again."
        }"#;

        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert!(!result.intervention_needed);
        assert!(result.insight.is_empty());
        assert!(result.suggested_action.is_empty());
        assert_eq!(result.why_it_matters, "System uncertain, try again.");
    }
}
