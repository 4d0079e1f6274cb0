// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Revlens.
//!
//! Provides WAL-mode SQLite storage with idempotent table bootstrap, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed
//! insert/list operations for analyzed reviews.

pub mod adapter;
pub mod database;
pub mod models;
pub mod queries;
pub mod schema;

pub use adapter::SqliteReviewStore;
pub use database::Database;
pub use models::*;
