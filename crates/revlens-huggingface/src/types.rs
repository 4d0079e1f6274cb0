// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the Hugging Face Inference API
//! text-classification task.

use serde::{Deserialize, Serialize};

/// Request body for a text-classification model.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest {
    pub inputs: String,
}

/// One candidate label with its probability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Classification response.
///
/// The hosted API wraps the candidates in an outer array, one per input
/// (`[[{..}, {..}]]`). Some deployments return the inner list directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    Batched(Vec<Vec<LabelScore>>),
    Single(Vec<LabelScore>),
}

impl InferenceResponse {
    /// Candidates for the first (only) input.
    pub fn candidates(&self) -> &[LabelScore] {
        match self {
            InferenceResponse::Batched(batches) => {
                batches.first().map(Vec::as_slice).unwrap_or_default()
            }
            InferenceResponse::Single(candidates) => candidates,
        }
    }

    /// The highest-scoring candidate, if any.
    pub fn top(&self) -> Option<&LabelScore> {
        self.candidates()
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// Error body returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    /// Seconds until a cold model finishes loading (503 responses).
    #[serde(default)]
    pub estimated_time: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_inputs_field() {
        let req = InferenceRequest {
            inputs: "great phone".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"inputs": "great phone"}));
    }

    #[test]
    fn batched_response_picks_highest_score() {
        let body = r#"[[{"label":"NEGATIVE","score":0.02},{"label":"POSITIVE","score":0.98}]]"#;
        let resp: InferenceResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(resp, InferenceResponse::Batched(_)));
        assert_eq!(resp.top().unwrap().label, "POSITIVE");
    }

    #[test]
    fn flat_response_is_accepted() {
        let body = r#"[{"label":"NEGATIVE","score":0.91},{"label":"POSITIVE","score":0.09}]"#;
        let resp: InferenceResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(resp, InferenceResponse::Single(_)));
        assert_eq!(resp.top().unwrap().label, "NEGATIVE");
    }

    #[test]
    fn empty_response_has_no_top() {
        let resp: InferenceResponse = serde_json::from_str("[[]]").unwrap();
        assert!(resp.top().is_none());
        let resp: InferenceResponse = serde_json::from_str("[]").unwrap();
        assert!(resp.top().is_none());
    }

    #[test]
    fn loading_error_parses_estimated_time() {
        let body = r#"{"error":"Model is currently loading","estimated_time":20.5}"#;
        let err: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.estimated_time, Some(20.5));
    }
}
