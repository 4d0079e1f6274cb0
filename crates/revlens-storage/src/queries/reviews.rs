// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Review insert and listing operations.

use std::str::FromStr;

use revlens_core::RevlensError;
use rusqlite::params;
use rusqlite::types::Type;
use tracing::warn;

use crate::database::Database;
use crate::models::{NewReview, Review, Sentiment};

const REVIEW_COLUMNS: &str = "id, review_text, sentiment, key_points, created_at";

/// Encode key points for the `key_points` column. An empty list is stored as NULL.
pub fn encode_key_points(points: &[String]) -> Result<Option<String>, serde_json::Error> {
    if points.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(points).map(Some)
}

/// Decode the `key_points` column. NULL and empty text decode to an empty list.
pub fn decode_key_points(raw: Option<&str>) -> Result<Vec<String>, serde_json::Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json),
    }
}

fn row_to_review(row: &rusqlite::Row<'_>) -> Result<Review, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let sentiment: String = row.get(2)?;
    let key_points: Option<String> = row.get(3)?;

    let sentiment = Sentiment::from_str(&sentiment).unwrap_or_else(|_| {
        warn!(id, stored = %sentiment, "unknown sentiment in store, reading as neutral");
        Sentiment::Neutral
    });
    let key_points = decode_key_points(key_points.as_deref())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Review {
        id,
        review_text: row.get(1)?,
        sentiment,
        key_points,
        created_at: row.get(4)?,
    })
}

/// Insert a review and return the stored row.
///
/// The insert and the read-back are a single `INSERT ... RETURNING` statement,
/// so a failure leaves nothing behind.
pub async fn insert_review(db: &Database, review: NewReview) -> Result<Review, RevlensError> {
    let key_points = encode_key_points(&review.key_points).map_err(|e| RevlensError::Storage {
        source: Box::new(e),
    })?;
    let sentiment = review.sentiment.as_str();
    let text = review.review_text;

    db.connection()
        .call(move |conn| -> Result<Review, rusqlite::Error> {
            conn.query_row(
                &format!(
                    "INSERT INTO reviews (review_text, sentiment, key_points)
                     VALUES (?1, ?2, ?3)
                     RETURNING {REVIEW_COLUMNS}"
                ),
                params![text, sentiment, key_points],
                row_to_review,
            )
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List every review, newest first.
pub async fn list_reviews(db: &Database) -> Result<Vec<Review>, RevlensError> {
    db.connection()
        .call(|conn| -> Result<Vec<Review>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY created_at DESC, id DESC"
            ))?;
            let reviews = stmt
                .query_map([], row_to_review)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(reviews)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Number of stored reviews.
pub async fn count_reviews(db: &Database) -> Result<i64, RevlensError> {
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))
        })
        .await
        .map_err(crate::database::map_tr_err)
}
