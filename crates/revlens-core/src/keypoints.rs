// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding of free-form model output into key points.
//!
//! Generative models are asked for a JSON array of strings but do not always
//! comply. Decoding tries the structured form first and falls back to a
//! line split; [`KeyPoints`] records which path produced the list.

use tracing::debug;

/// Upper bound on key points kept for any review.
pub const MAX_KEY_POINTS: usize = 5;

/// Stored when the extractor has no credentials.
pub const UNCONFIGURED_PLACEHOLDER: &str = "No key points extracted (API not configured)";

/// Stored when the extractor fails or its output cannot be decoded.
pub const FAILURE_PLACEHOLDER: &str = "Key points extraction failed";

/// Key points together with the decoding path that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPoints {
    /// Output decoded as a JSON array of strings.
    Structured(Vec<String>),
    /// Output was not JSON; non-empty lines were used instead.
    Heuristic(Vec<String>),
}

impl KeyPoints {
    /// The decoded list, regardless of how it was obtained.
    pub fn points(&self) -> &[String] {
        match self {
            KeyPoints::Structured(points) | KeyPoints::Heuristic(points) => points,
        }
    }

    pub fn into_points(self) -> Vec<String> {
        match self {
            KeyPoints::Structured(points) | KeyPoints::Heuristic(points) => points,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, KeyPoints::Structured(_))
    }
}

/// Decode raw model text into at most `max` key points.
///
/// Returns `None` when the text is valid JSON of the wrong shape (an object,
/// an array containing non-strings, a bare scalar) or when the line split
/// yields nothing.
pub fn parse_key_points(raw: &str, max: usize) -> Option<KeyPoints> {
    let body = strip_code_fence(raw);

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => {
            let mut points = Vec::with_capacity(items.len().min(max));
            for item in items {
                match item {
                    serde_json::Value::String(s) => points.push(s),
                    other => {
                        debug!(element = %other, "key point array holds a non-string element");
                        return None;
                    }
                }
            }
            points.truncate(max);
            Some(KeyPoints::Structured(points))
        }
        Ok(other) => {
            debug!(kind = json_kind(&other), "key point output is JSON but not an array");
            None
        }
        Err(_) => {
            let points: Vec<String> = body
                .lines()
                .map(strip_bullet)
                .filter(|line| !line.is_empty())
                .take(max)
                .map(str::to_string)
                .collect();
            if points.is_empty() {
                None
            } else {
                Some(KeyPoints::Heuristic(points))
            }
        }
    }
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    rest.trim()
}

/// Trim a line and drop a leading list marker (`-`, `*`, `•`, `1.`, `2)`).
fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim();
        }
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return rest.trim();
        }
    }
    line
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
