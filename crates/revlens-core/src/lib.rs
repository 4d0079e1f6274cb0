// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Revlens, the product review analyzer.
//!
//! This crate provides the trait definitions, error type, and review types
//! shared by the storage, model-client, analyzer, and gateway crates.

pub mod error;
pub mod keypoints;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RevlensError;
pub use keypoints::{KeyPoints, parse_key_points};
pub use types::{HealthStatus, NewReview, Review, Sentiment};

pub use traits::{KeyPointExtractor, PluginAdapter, ReviewStore, SentimentClassifier};
