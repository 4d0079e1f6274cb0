// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Table definitions, applied on every open.
//!
//! Statements are `IF NOT EXISTS`, so opening an existing database is a no-op.
//! There is a single table and no versioned migrations.

/// The reviews table and its listing index.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS reviews (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    review_text TEXT NOT NULL CHECK (length(trim(review_text)) > 0),
    sentiment   VARCHAR(20) NOT NULL
                CHECK (sentiment IN ('positive', 'negative', 'neutral')),
    key_points  TEXT,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_reviews_created_at
    ON reviews (created_at DESC, id DESC);
";

/// Create the tables if they do not exist yet.
pub fn apply(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_is_idempotent() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();
        apply(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'reviews'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tables, vec!["reviews".to_string()]);
    }

    #[test]
    fn sentiment_outside_closed_set_is_rejected() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO reviews (review_text, sentiment) VALUES ('fine product', 'ecstatic')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn created_at_defaults_to_iso_timestamp() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();

        conn.execute(
            "INSERT INTO reviews (review_text, sentiment) VALUES ('fine product', 'neutral')",
            [],
        )
        .unwrap();
        let created_at: String = conn
            .query_row("SELECT created_at FROM reviews", [], |row| row.get(0))
            .unwrap();
        // e.g. 2026-01-01T12:34:56.789Z
        assert_eq!(created_at.len(), 24, "got {created_at}");
        assert!(created_at.ends_with('Z'));
        assert_eq!(&created_at[10..11], "T");
    }
}
