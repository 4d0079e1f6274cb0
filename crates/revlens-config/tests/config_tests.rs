// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Revlens configuration system.

use std::io::Write;

use revlens_config::diagnostic::{ConfigError, suggest_key};
use revlens_config::model::RevlensConfig;
use revlens_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_revlens_config() {
    let toml = r#"
[server]
host = "127.0.0.1"
port = 6543
log_level = "debug"

[storage]
database_path = "/tmp/reviews-test.db"
wal_mode = false

[sentiment]
api_token = "hf_123"
model = "cardiffnlp/twitter-roberta-base-sentiment-latest"
timeout_secs = 10

[gemini]
api_key = "AIza-123"
model = "gemini-pro"

[analysis]
min_review_chars = 12
max_classifier_chars = 256
max_key_points = 3
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 6543);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/reviews-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.sentiment.api_token.as_deref(), Some("hf_123"));
    assert_eq!(
        config.sentiment.model,
        "cardiffnlp/twitter-roberta-base-sentiment-latest"
    );
    assert_eq!(config.sentiment.timeout_secs, 10);
    assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-123"));
    assert_eq!(config.gemini.model, "gemini-pro");
    assert_eq!(config.analysis.min_review_chars, 12);
    assert_eq!(config.analysis.max_classifier_chars, 256);
    assert_eq!(config.analysis.max_key_points, 3);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.server.log_level, "info");
    assert_eq!(config.storage.database_path, "reviews.db");
    assert!(config.storage.wal_mode);
    assert!(config.sentiment.api_token.is_none());
    assert_eq!(
        config.sentiment.model,
        "distilbert-base-uncased-finetuned-sst-2-english"
    );
    assert!(config.gemini.api_key.is_none());
    assert_eq!(config.analysis.min_review_chars, 10);
    assert_eq!(config.analysis.max_classifier_chars, 512);
    assert_eq!(config.analysis.max_key_points, 5);
}

/// Unknown field in [server] produces an unknown-field error.
#[test]
fn unknown_field_in_server_produces_error() {
    let toml = r#"
[server]
prot = 8080
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("prot"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telemetry]
enabled = true
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("telemetry"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Dot-notation overrides land in the right section (as the env providers produce).
#[test]
fn dotted_override_sets_gemini_api_key() {
    use figment::{Figment, providers::Serialized};

    let config: RevlensConfig = Figment::new()
        .merge(Serialized::defaults(RevlensConfig::default()))
        .merge(("gemini.api_key", "xyz-from-env"))
        .extract()
        .expect("should set api_key via dot notation");

    assert_eq!(config.gemini.api_key.as_deref(), Some("xyz-from-env"));
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: RevlensConfig = Figment::new()
        .merge(Serialized::defaults(RevlensConfig::default()))
        .merge(Toml::file("/nonexistent/path/revlens.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.server.port, 5000);
}

/// Unknown key "prot" in [server] produces suggestion "did you mean `server.port`?"
#[test]
fn diagnostic_error_includes_unknown_key_and_suggestion() {
    let toml = r#"
[server]
prot = 8080
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "server.prot"
                && suggestion.as_deref() == Some("server.port")
                && valid_keys.contains("log_level")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'prot' with suggestion 'port', got: {errors:?}"
    );
}

/// Invalid type (string where number expected) produces clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[analysis]
max_key_points = "five"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. })),
        "got: {errors:?}"
    );
}

/// Validation errors surface through load_and_validate_str.
#[test]
fn validation_rejects_postgres_url() {
    let toml = r#"
[storage]
database_path = "postgresql://localhost/reviews"
"#;

    let errors = load_and_validate_str(toml).expect_err("postgres URL should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("storage.database_path"))
    }));
}

/// A config file on disk is read and validated.
#[test]
fn load_and_validate_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[analysis]\nmin_review_chars = 15").unwrap();

    let config = load_and_validate_path(file.path()).expect("file config should validate");
    assert_eq!(config.analysis.min_review_chars, 15);
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::UnknownKey {
        key: "server.prot".to_string(),
        suggestion: Some("server.port".to_string()),
        valid_keys: "host, port, log_level".to_string(),
        origin: None,
        span: None,
        src: None,
    };

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("prot"), "rendered report should mention the key");
}

#[test]
fn suggest_key_handles_section_names() {
    let sections = &["server", "storage", "sentiment", "gemini", "analysis"];
    assert_eq!(suggest_key("storge", sections), Some("storage".to_string()));
}
