// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ReviewStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use revlens_config::model::StorageConfig;
use revlens_core::types::{NewReview, Review};
use revlens_core::{HealthStatus, PluginAdapter, ReviewStore, RevlensError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed review store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened on the first call to
/// [`ReviewStore::initialize`].
pub struct SqliteReviewStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteReviewStore {
    /// Create a new store. Nothing is opened until [`ReviewStore::initialize`].
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Filesystem path the store opens, with any `sqlite://` scheme removed.
    pub fn path(&self) -> String {
        self.config.resolved_path()
    }

    fn db(&self) -> Result<&Database, RevlensError> {
        self.db.get().ok_or_else(|| RevlensError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteReviewStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> Result<HealthStatus, RevlensError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> { conn.execute_batch("SELECT 1;") })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RevlensError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewStore for SqliteReviewStore {
    async fn initialize(&self) -> Result<(), RevlensError> {
        let path = self.path();
        let db = Database::open_with(&path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| RevlensError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %path, "SQLite review store initialized");
        Ok(())
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, RevlensError> {
        queries::reviews::insert_review(self.db()?, review).await
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, RevlensError> {
        queries::reviews::list_reviews(self.db()?).await
    }

    async fn count_reviews(&self) -> Result<i64, RevlensError> {
        queries::reviews::count_reviews(self.db()?).await
    }
}
