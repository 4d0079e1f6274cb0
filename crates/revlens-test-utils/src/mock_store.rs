// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory review store, optionally broken, for exercising store failures.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use revlens_core::RevlensError;
use revlens_core::traits::{PluginAdapter, ReviewStore};
use revlens_core::types::{HealthStatus, NewReview, Review};

/// A `Vec`-backed store. When broken, every operation returns a storage error.
pub struct MockStore {
    reviews: Mutex<Vec<Review>>,
    broken: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            reviews: Mutex::new(Vec::new()),
            broken: AtomicBool::new(false),
        }
    }

    /// A store whose every operation fails.
    pub fn broken() -> Self {
        let store = Self::new();
        store.set_broken(true);
        store
    }

    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RevlensError> {
        if self.broken.load(Ordering::SeqCst) {
            Err(RevlensError::Storage {
                source: "mock store is broken".into(),
            })
        } else {
            Ok(())
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    async fn health_check(&self) -> Result<HealthStatus, RevlensError> {
        self.check()?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RevlensError> {
        Ok(())
    }
}

#[async_trait]
impl ReviewStore for MockStore {
    async fn initialize(&self) -> Result<(), RevlensError> {
        self.check()
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, RevlensError> {
        self.check()?;
        let mut reviews = self.reviews.lock().await;
        let stored = Review {
            id: reviews.len() as i64 + 1,
            review_text: review.review_text,
            sentiment: review.sentiment,
            key_points: review.key_points,
            created_at: chrono::Utc::now()
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
        };
        reviews.push(stored.clone());
        Ok(stored)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, RevlensError> {
        self.check()?;
        let mut reviews = self.reviews.lock().await.clone();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(reviews)
    }

    async fn count_reviews(&self) -> Result<i64, RevlensError> {
        self.check()?;
        Ok(self.reviews.lock().await.len() as i64)
    }
}
