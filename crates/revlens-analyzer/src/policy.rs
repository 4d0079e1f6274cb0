// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input validation and per-collaborator limits.

use revlens_config::model::AnalysisConfig;
use revlens_core::RevlensError;
use revlens_core::keypoints::MAX_KEY_POINTS;

pub const REVIEW_TEXT_REQUIRED: &str = "Review text is required";
pub const REVIEW_TEXT_TOO_SHORT: &str = "Review text too short";

/// Limits applied to every analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisPolicy {
    /// Minimum length of the trimmed text, in characters.
    pub min_review_chars: usize,
    /// Characters of the trimmed text sent to the classifier.
    pub max_classifier_chars: usize,
    /// Key points requested from the extractor; never above [`MAX_KEY_POINTS`].
    pub max_key_points: usize,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

impl From<&AnalysisConfig> for AnalysisPolicy {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            min_review_chars: config.min_review_chars,
            max_classifier_chars: config.max_classifier_chars,
            max_key_points: config.max_key_points.min(MAX_KEY_POINTS),
        }
    }
}

impl AnalysisPolicy {
    /// Trim `input` and check it is present and long enough.
    ///
    /// Length is counted in Unicode scalar values, so `"ñññññññññ"` is nine
    /// characters regardless of its byte length.
    pub fn validate<'a>(&self, input: Option<&'a str>) -> Result<&'a str, RevlensError> {
        let text = input.map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(RevlensError::Validation(REVIEW_TEXT_REQUIRED.into()));
        }
        if text.chars().count() < self.min_review_chars {
            return Err(RevlensError::Validation(REVIEW_TEXT_TOO_SHORT.into()));
        }
        Ok(text)
    }

    /// The prefix of `text` the classifier sees.
    pub fn classifier_input<'a>(&self, text: &'a str) -> &'a str {
        truncate_chars(text, self.max_classifier_chars)
    }
}

/// Longest prefix of `text` with at most `max` characters, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_text_are_required() {
        let policy = AnalysisPolicy::default();
        for input in [None, Some(""), Some("   \n\t ")] {
            let err = policy.validate(input).unwrap_err();
            assert_eq!(err.to_string(), REVIEW_TEXT_REQUIRED);
        }
    }

    #[test]
    fn short_text_is_rejected_after_trimming() {
        let policy = AnalysisPolicy::default();
        let err = policy.validate(Some("   too short   ")).unwrap_err();
        assert_eq!(err.to_string(), REVIEW_TEXT_TOO_SHORT);

        assert!(policy.validate(Some("123456789")).is_err());
        assert_eq!(policy.validate(Some(" 1234567890 ")).unwrap(), "1234567890");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let policy = AnalysisPolicy::default();
        // Nine two-byte characters: 18 bytes, still too short.
        assert!(policy.validate(Some("ñññññññññ")).is_err());
        assert!(policy.validate(Some("ññññññññññ")).is_ok());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 512), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn classifier_input_is_capped() {
        let policy = AnalysisPolicy::default();
        let long = "a".repeat(600);
        assert_eq!(policy.classifier_input(&long).len(), 512);
    }

    #[test]
    fn key_point_limit_is_clamped() {
        let config = AnalysisConfig {
            max_key_points: 12,
            ..AnalysisConfig::default()
        };
        assert_eq!(AnalysisPolicy::from(&config).max_key_points, MAX_KEY_POINTS);
    }
}
