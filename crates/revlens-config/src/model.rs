// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Revlens.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Revlens configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RevlensConfig {
    /// HTTP listener and logging settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Sentiment classifier (Hugging Face Inference API) settings.
    #[serde(default)]
    pub sentiment: SentimentConfig,

    /// Key-point extractor (Google Gemini) settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Input validation and output limits for the analysis pipeline.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl RevlensConfig {
    /// Copy of this config with every credential replaced by a marker.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.sentiment.api_token.is_some() {
            copy.sentiment.api_token = Some("[redacted]".to_string());
        }
        if copy.gemini.api_key.is_some() {
            copy.gemini.api_key = Some("[redacted]".to_string());
        }
        copy
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite database location: a file path, `:memory:`, or a `sqlite://` URL.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

impl StorageConfig {
    /// Filesystem path for SQLite, with any `sqlite://` scheme removed.
    ///
    /// `sqlite:///./reviews.db` and `sqlite://reviews.db` both resolve to a
    /// relative path; `sqlite:////var/lib/reviews.db` resolves to an absolute one.
    pub fn resolved_path(&self) -> String {
        let raw = self.database_path.trim();
        match raw.strip_prefix("sqlite://") {
            Some(rest) => rest.strip_prefix('/').unwrap_or(rest).to_string(),
            None => raw.to_string(),
        }
    }

    /// True when `database_path` names a URL scheme other than SQLite.
    pub fn is_foreign_url(&self) -> bool {
        let raw = self.database_path.trim();
        raw.contains("://") && !raw.starts_with("sqlite://")
    }
}

fn default_database_path() -> String {
    "reviews.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Sentiment classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SentimentConfig {
    /// Hugging Face API token. `None` leaves the classifier unconfigured.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Model identifier on the Hugging Face hub.
    #[serde(default = "default_sentiment_model")]
    pub model: String,

    /// Inference API base URL.
    #[serde(default = "default_sentiment_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            model: default_sentiment_model(),
            base_url: default_sentiment_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_sentiment_model() -> String {
    "distilbert-base-uncased-finetuned-sst-2-english".to_string()
}

fn default_sentiment_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Google Gemini configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` leaves the extractor unconfigured.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Generative model used for key-point extraction.
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Generative Language API base URL.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

/// Limits applied by the analysis pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Minimum review length in characters after trimming.
    #[serde(default = "default_min_review_chars")]
    pub min_review_chars: usize,

    /// Review text passed to the classifier is cut to this many characters.
    #[serde(default = "default_max_classifier_chars")]
    pub max_classifier_chars: usize,

    /// Maximum number of key points kept per review (at most 5).
    #[serde(default = "default_max_key_points")]
    pub max_key_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_review_chars: default_min_review_chars(),
            max_classifier_chars: default_max_classifier_chars(),
            max_key_points: default_max_key_points(),
        }
    }
}

fn default_min_review_chars() -> usize {
    10
}

fn default_max_classifier_chars() -> usize {
    512
}

fn default_max_key_points() -> usize {
    5
}
