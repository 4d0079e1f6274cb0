// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-point extractor trait for generative summarization services.

use async_trait::async_trait;

use crate::error::RevlensError;
use crate::keypoints::KeyPoints;
use crate::traits::adapter::PluginAdapter;

/// Extracts a short ordered list of key points from review text.
#[async_trait]
pub trait KeyPointExtractor: PluginAdapter {
    /// Extracts at most `max_points` key points from `text`.
    ///
    /// Output that cannot be decoded is reported as
    /// [`RevlensError::Collaborator`].
    async fn extract(&self, text: &str, max_points: usize) -> Result<KeyPoints, RevlensError>;
}
