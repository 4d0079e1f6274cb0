// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use revlens_core::RevlensError;
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

pub(crate) const COLLABORATOR: &str = "gemini";

/// HTTP client for Gemini API communication.
///
/// The API key travels in the `x-goog-api-key` header rather than the query
/// string so it never appears in request logs.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: &str,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, RevlensError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| RevlensError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);
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

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Sends a generation request and returns the decoded response.
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, RevlensError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| RevlensError::Collaborator {
                collaborator: COLLABORATOR.into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "generateContent response received");

        let body = response.text().await.map_err(|e| RevlensError::Collaborator {
            collaborator: COLLABORATOR.into(),
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Gemini API error ({}): {}",
                    api_err.error.status, api_err.error.message
                ),
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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            "gem-test-key",
            "gemini-1.5-flash".into(),
            "https://unused.invalid".into(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(base_url.to_string())
    }

    #[tokio::test]
    async fn generate_success_sends_key_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "gem-test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "[\"ok\"]"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let resp = client
            .generate(&GenerateContentRequest::from_prompt("hello".into()))
            .await
            .unwrap();
        assert_eq!(resp.text().as_deref(), Some("[\"ok\"]"));
    }

    #[tokio::test]
    async fn generate_reports_api_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate(&GenerateContentRequest::from_prompt("hello".into()))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("INVALID_ARGUMENT"), "got: {msg}");
        assert!(msg.starts_with("gemini error"), "got: {msg}");
    }

    #[tokio::test]
    async fn generate_reports_non_json_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate(&GenerateContentRequest::from_prompt("hello".into()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("502"), "got: {err}");
    }

    #[test]
    fn endpoint_includes_model_and_method() {
        let client = test_client("http://localhost:9/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
