// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All statements are serialized through tokio-rusqlite's single background
//! thread. `Database` is the single writer; query modules accept `&Database`
//! and go through [`Database::connection`]. Do NOT open additional
//! connections for writes.

use revlens_core::RevlensError;
use tracing::debug;

use crate::schema;

/// Convert a tokio-rusqlite error into [`RevlensError::Storage`].
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> RevlensError {
    RevlensError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path` with WAL enabled.
    pub async fn open(path: &str) -> Result<Self, RevlensError> {
        Self::open_with(path, true).await
    }

    /// Open (or create) the database at `path`, apply PRAGMAs, and create tables.
    ///
    /// WAL is skipped for `:memory:` databases, which do not support it.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, RevlensError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| RevlensError::Storage {
                source: Box::new(e),
            })?;

        let use_wal = wal_mode && path != ":memory:";
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if use_wal {
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.busy_timeout(std::time::Duration::from_secs(5))?;
            schema::apply(conn)
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, wal = use_wal, "database opened");
        Ok(Self { conn })
    }

    /// The underlying connection for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL so the main database file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), RevlensError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoint and close the connection.
    pub async fn close(self) -> Result<(), RevlensError> {
        self.checkpoint().await?;
        self.conn.close().await.map_err(|e| RevlensError::Storage {
            source: Box::new(e),
        })
    }
}
