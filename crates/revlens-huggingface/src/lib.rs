// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hugging Face sentiment classifier for Revlens.
//!
//! This crate implements [`SentimentClassifier`] on top of the Hugging Face
//! Inference API text-classification task. Model labels are normalized into
//! the three-value [`Sentiment`] set.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use revlens_config::model::SentimentConfig;
use revlens_core::error::RevlensError;
use revlens_core::traits::{PluginAdapter, SentimentClassifier};
use revlens_core::types::{HealthStatus, Sentiment};
use tracing::{debug, info};

use crate::client::{COLLABORATOR, HuggingFaceClient};

/// Sentiment classifier backed by a hosted Hugging Face model.
///
/// Without an API token the classifier is unconfigured: it still
/// constructs, but every call returns [`RevlensError::Unconfigured`].
pub struct HuggingFaceClassifier {
    client: Option<HuggingFaceClient>,
    model: String,
}

impl HuggingFaceClassifier {
    /// Creates a classifier from the `[sentiment]` config section.
    pub fn new(config: &SentimentConfig) -> Result<Self, RevlensError> {
        let client = match resolve_api_token(&config.api_token) {
            Some(token) => {
                let client = HuggingFaceClient::new(
                    token,
                    config.model.clone(),
                    config.base_url.clone(),
                    Duration::from_secs(config.timeout_secs),
                )?;
                info!(model = %config.model, "Hugging Face sentiment classifier initialized");
                Some(client)
            }
            None => {
                info!("no Hugging Face API token configured; sentiment will default to neutral");
                None
            }
        };

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    /// Creates a classifier with an existing client.
    pub fn with_client(client: HuggingFaceClient) -> Self {
        Self {
            model: client.model().to_string(),
            client: Some(client),
        }
    }

    /// Model identifier this classifier targets.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl PluginAdapter for HuggingFaceClassifier {
    fn name(&self) -> &str {
        COLLABORATOR
    }

    async fn health_check(&self) -> Result<HealthStatus, RevlensError> {
        // No inference call here; hosted models bill per request.
        if self.client.is_some() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded("API token not configured".into()))
        }
    }

    async fn shutdown(&self) -> Result<(), RevlensError> {
        debug!("Hugging Face classifier shutting down");
        Ok(())
    }
}

#[async_trait]
impl SentimentClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<Sentiment, RevlensError> {
        let client = self.client.as_ref().ok_or_else(|| RevlensError::Unconfigured {
            collaborator: COLLABORATOR.into(),
        })?;

        let response = client.classify(text).await?;
        let top = response
            .top()
            .ok_or_else(|| RevlensError::collaborator(COLLABORATOR, "response had no labels"))?;

        let sentiment = Sentiment::from_label(&top.label);
        debug!(label = %top.label, score = top.score, %sentiment, "review classified");
        Ok(sentiment)
    }
}

/// Returns the configured token unless it is missing or blank.
fn resolve_api_token(config_token: &Option<String>) -> Option<&str> {
    config_token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
