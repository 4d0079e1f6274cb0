// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sentiment classifier trait for external text classification models.

use async_trait::async_trait;

use crate::error::RevlensError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Sentiment;

/// Maps review text to a coarse polarity label.
///
/// Implementations are built once at startup and shared across requests.
/// A classifier built without credentials stays usable but returns
/// [`RevlensError::Unconfigured`] from every call.
#[async_trait]
pub trait SentimentClassifier: PluginAdapter {
    /// Classifies `text`. Callers cap the length before calling.
    async fn classify(&self, text: &str) -> Result<Sentiment, RevlensError>;
}
