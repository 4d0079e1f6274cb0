// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Review store trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::RevlensError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewReview, Review};

/// Persistence for analyzed reviews.
///
/// Inserts are atomic: a failed insert leaves no row behind. Reads only
/// observe committed inserts. [`PluginAdapter::shutdown`] flushes pending
/// writes and closes the backend.
#[async_trait]
pub trait ReviewStore: PluginAdapter {
    /// Opens the backend and creates the reviews table if missing.
    async fn initialize(&self) -> Result<(), RevlensError>;

    /// Persists a review and returns it with its assigned `id` and `created_at`.
    async fn insert_review(&self, review: NewReview) -> Result<Review, RevlensError>;

    /// Returns all reviews, newest first (`created_at` desc, then `id` desc).
    async fn list_reviews(&self) -> Result<Vec<Review>, RevlensError>;

    /// Number of stored reviews.
    async fn count_reviews(&self) -> Result<i64, RevlensError>;
}
