// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the review pipeline.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` so they can be held as `Arc<dyn ...>` trait objects.

pub mod adapter;
pub mod classifier;
pub mod extractor;
pub mod storage;

pub use adapter::PluginAdapter;
pub use classifier::SentimentClassifier;
pub use extractor::KeyPointExtractor;
pub use storage::ReviewStore;
