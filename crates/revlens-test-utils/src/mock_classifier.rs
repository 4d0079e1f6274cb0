// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock sentiment classifier for deterministic testing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use revlens_core::RevlensError;
use revlens_core::traits::{PluginAdapter, SentimentClassifier};
use revlens_core::types::{HealthStatus, Sentiment};

#[derive(Debug, Clone)]
enum Behavior {
    Returns(Sentiment),
    Fails(String),
    Unconfigured,
}

/// A classifier with a fixed outcome that records every text it receives.
#[derive(Clone)]
pub struct MockClassifier {
    behavior: Behavior,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockClassifier {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always classifies as `sentiment`.
    pub fn returning(sentiment: Sentiment) -> Self {
        Self::with_behavior(Behavior::Returns(sentiment))
    }

    /// Always fails with a collaborator error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self::with_behavior(Behavior::Fails(message.to_string()))
    }

    /// Behaves like a classifier constructed without credentials.
    pub fn unconfigured() -> Self {
        Self::with_behavior(Behavior::Unconfigured)
    }

    /// Texts passed to `classify`, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::returning(Sentiment::Positive)
    }
}

#[async_trait]
impl PluginAdapter for MockClassifier {
    fn name(&self) -> &str {
        "mock-classifier"
    }

    async fn health_check(&self) -> Result<HealthStatus, RevlensError> {
        match self.behavior {
            Behavior::Unconfigured => Ok(HealthStatus::Degraded("no credentials".into())),
            _ => Ok(HealthStatus::Healthy),
        }
    }

    async fn shutdown(&self) -> Result<(), RevlensError> {
        Ok(())
    }
}

#[async_trait]
impl SentimentClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<Sentiment, RevlensError> {
        self.calls.lock().await.push(text.to_string());
        match &self.behavior {
            Behavior::Returns(sentiment) => Ok(*sentiment),
            Behavior::Fails(message) => Err(RevlensError::collaborator("mock-classifier", message)),
            Behavior::Unconfigured => Err(RevlensError::Unconfigured {
                collaborator: "mock-classifier".into(),
            }),
        }
    }
}
