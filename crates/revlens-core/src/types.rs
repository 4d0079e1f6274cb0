// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the review pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but running on a fallback path.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Coarse polarity label attached to every stored review.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Clamp an arbitrary model label into the three-value set.
    ///
    /// Matching is case-insensitive and substring based, so `POSITIVE`,
    /// `LABEL_POSITIVE` and `very positive` all map to [`Sentiment::Positive`].
    /// Anything unrecognised is [`Sentiment::Neutral`].
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("positive") {
            Sentiment::Positive
        } else if lower.contains("negative") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Lowercase storage/wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// A review ready to be persisted; `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub review_text: String,
    pub sentiment: Sentiment,
    pub key_points: Vec<String>,
}

/// A persisted, analyzed review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Store-assigned, monotonically increasing identifier.
    pub id: i64,
    pub review_text: String,
    pub sentiment: Sentiment,
    /// Decoded key points, at most five. Empty when none were stored.
    pub key_points: Vec<String>,
    /// ISO 8601 UTC timestamp set by the store at insert time.
    pub created_at: String,
}
