// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini key-point extractor for Revlens.
//!
//! Implements [`KeyPointExtractor`] by prompting a Gemini model for a JSON
//! array of short phrases and decoding the reply with
//! [`revlens_core::parse_key_points`].

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use revlens_config::model::GeminiConfig;
use revlens_core::error::RevlensError;
use revlens_core::keypoints::{KeyPoints, parse_key_points};
use revlens_core::traits::{KeyPointExtractor, PluginAdapter};
use revlens_core::types::HealthStatus;
use tracing::{debug, info};

use crate::client::{COLLABORATOR, GeminiClient};
use crate::types::{GenerateContentRequest, GenerationConfig};

/// Value shipped in sample `.env` files; treated as no key at all.
const PLACEHOLDER_API_KEY: &str = "PASTE_YOUR_NEW_API_KEY_HERE";

/// Key-point extractor backed by the Gemini API.
///
/// Without an API key the extractor is unconfigured and every call returns
/// [`RevlensError::Unconfigured`].
pub struct GeminiExtractor {
    client: Option<GeminiClient>,
    model: String,
}

impl GeminiExtractor {
    /// Creates an extractor from the `[gemini]` config section.
    pub fn new(config: &GeminiConfig) -> Result<Self, RevlensError> {
        let client = match resolve_api_key(&config.api_key) {
            Some(key) => {
                let client = GeminiClient::new(
                    key,
                    config.model.clone(),
                    config.base_url.clone(),
                    Duration::from_secs(config.timeout_secs),
                )?;
                info!(model = %config.model, "Gemini key-point extractor initialized");
                Some(client)
            }
            None => {
                info!("no Gemini API key configured; key points will use a placeholder");
                None
            }
        };

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    /// Creates an extractor with an existing client.
    pub fn with_client(client: GeminiClient) -> Self {
        Self {
            model: client.model().to_string(),
            client: Some(client),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl PluginAdapter for GeminiExtractor {
    fn name(&self) -> &str {
        COLLABORATOR
    }

    async fn health_check(&self) -> Result<HealthStatus, RevlensError> {
        if self.client.is_some() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded("API key not configured".into()))
        }
    }

    async fn shutdown(&self) -> Result<(), RevlensError> {
        debug!("Gemini extractor shutting down");
        Ok(())
    }
}

#[async_trait]
impl KeyPointExtractor for GeminiExtractor {
    async fn extract(&self, text: &str, max_points: usize) -> Result<KeyPoints, RevlensError> {
        let client = self.client.as_ref().ok_or_else(|| RevlensError::Unconfigured {
            collaborator: COLLABORATOR.into(),
        })?;

        let mut request = GenerateContentRequest::from_prompt(build_prompt(text, max_points));
        request.generation_config = Some(GenerationConfig {
            temperature: Some(0.2),
            max_output_tokens: Some(512),
        });

        let response = client.generate(&request).await?;
        let raw = response
            .text()
            .ok_or_else(|| RevlensError::collaborator(COLLABORATOR, "response contained no text"))?;

        let points = parse_key_points(&raw, max_points).ok_or_else(|| {
            RevlensError::collaborator(COLLABORATOR, "response could not be decoded as key points")
        })?;

        debug!(
            count = points.points().len(),
            structured = points.is_structured(),
            "key points extracted"
        );
        Ok(points)
    }
}

/// Prompt asking for a JSON array of at most `max_points` phrases.
fn build_prompt(text: &str, max_points: usize) -> String {
    let min_points = max_points.min(3);
    format!(
        "Extract {min_points}-{max_points} key points from this product review.\n\
         Return them as a JSON array of strings and nothing else.\n\
         \n\
         Review: {text}\n\
         \n\
         Format: [\"key point 1\", \"key point 2\", \"key point 3\"]"
    )
}

/// Returns the configured key unless it is missing, blank, or the sample placeholder.
fn resolve_api_key(config_key: &Option<String>) -> Option<&str> {
    config_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
}
