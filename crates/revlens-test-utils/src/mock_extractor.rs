// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock key-point extractor for deterministic testing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use revlens_core::RevlensError;
use revlens_core::keypoints::KeyPoints;
use revlens_core::traits::{KeyPointExtractor, PluginAdapter};
use revlens_core::types::HealthStatus;

#[derive(Debug, Clone)]
enum Behavior {
    Returns(Vec<String>),
    /// Raw model output, decoded the same way the real extractor decodes it.
    Raw(String),
    Fails(String),
    Unconfigured,
}

/// An extractor with a fixed outcome that records every text it receives.
#[derive(Clone)]
pub struct MockExtractor {
    behavior: Behavior,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockExtractor {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always returns `points` as a structured list, capped at `max_points`.
    pub fn returning(points: &[&str]) -> Self {
        Self::with_behavior(Behavior::Returns(
            points.iter().map(|p| p.to_string()).collect(),
        ))
    }

    /// Pretends the model replied with `raw` text.
    pub fn replying(raw: &str) -> Self {
        Self::with_behavior(Behavior::Raw(raw.to_string()))
    }

    /// Always fails with a collaborator error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self::with_behavior(Behavior::Fails(message.to_string()))
    }

    /// Behaves like an extractor constructed without credentials.
    pub fn unconfigured() -> Self {
        Self::with_behavior(Behavior::Unconfigured)
    }

    /// Texts passed to `extract`, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::returning(&["Mock key point"])
    }
}

#[async_trait]
impl PluginAdapter for MockExtractor {
    fn name(&self) -> &str {
        "mock-extractor"
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
impl KeyPointExtractor for MockExtractor {
    async fn extract(&self, text: &str, max_points: usize) -> Result<KeyPoints, RevlensError> {
        self.calls.lock().await.push(text.to_string());
        match &self.behavior {
            Behavior::Returns(points) => Ok(KeyPoints::Structured(
                points.iter().take(max_points).cloned().collect(),
            )),
            Behavior::Raw(raw) => revlens_core::parse_key_points(raw, max_points).ok_or_else(|| {
                RevlensError::collaborator("mock-extractor", "unparsable key point output")
            }),
            Behavior::Fails(message) => Err(RevlensError::collaborator("mock-extractor", message)),
            Behavior::Unconfigured => Err(RevlensError::Unconfigured {
                collaborator: "mock-extractor".into(),
            }),
        }
    }
}
