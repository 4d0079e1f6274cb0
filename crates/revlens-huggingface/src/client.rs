// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Hugging Face Inference API.
//!
//! Provides [`HuggingFaceClient`] which handles request construction,
//! bearer authentication, and response decoding for text-classification
//! models. Requests are not retried.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use revlens_core::RevlensError;
use tracing::debug;

use crate::types::{ApiErrorResponse, InferenceRequest, InferenceResponse};

/// Collaborator name used in errors and logs.
pub(crate) const COLLABORATOR: &str = "huggingface";

/// HTTP client for Hugging Face Inference API communication.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl HuggingFaceClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `api_token` - Hugging Face access token, sent as a bearer token
    /// * `model` - Model repository id, e.g. `distilbert-base-uncased-finetuned-sst-2-english`
    /// * `base_url` - API root without a trailing slash
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_token: &str,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, RevlensError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_token}"))
            .map_err(|e| RevlensError::Config(format!("invalid API token header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RevlensError::Collaborator {
                collaborator: COLLABORATOR.into(),
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    /// Sends `text` to the model and returns the decoded label scores.
    pub async fn classify(&self, text: &str) -> Result<InferenceResponse, RevlensError> {
        let request = InferenceRequest {
            inputs: text.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| RevlensError::Collaborator {
                collaborator: COLLABORATOR.into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "classification response received");

        let body = response.text().await.map_err(|e| RevlensError::Collaborator {
            collaborator: COLLABORATOR.into(),
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!("Hugging Face API error ({status}): {}", api_err.error),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(RevlensError::collaborator(COLLABORATOR, message));
        }

        serde_json::from_str(&body).map_err(|e| RevlensError::Collaborator {
            collaborator: COLLABORATOR.into(),
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
