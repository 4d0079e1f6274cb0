// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Revlens integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockClassifier`] - Sentiment classifier with a fixed outcome
//! - [`MockExtractor`] - Key-point extractor with a fixed outcome
//! - [`MockStore`] - In-memory review store that can be switched to fail
//! - [`TestHarness`] - Temp SQLite store, analyzer and router wired together

pub mod harness;
pub mod mock_classifier;
pub mod mock_extractor;
pub mod mock_store;

pub use harness::TestHarness;
pub use mock_classifier::MockClassifier;
pub use mock_extractor::MockExtractor;
pub use mock_store::MockStore;
