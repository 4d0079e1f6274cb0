// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints that serde attributes cannot express:
//! bindable hosts, SQLite-only storage URLs, and sane analysis limits.

use revlens_core::keypoints::MAX_KEY_POINTS;

use crate::diagnostic::ConfigError;
use crate::model::RevlensConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RevlensConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.resolved_path().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.storage.is_foreign_url() {
        errors.push(ConfigError::Validation {
            message: format!(
                "storage.database_path `{}` uses an unsupported scheme; only SQLite paths and sqlite:// URLs are accepted",
                config.storage.database_path
            ),
        });
    }

    if config.analysis.min_review_chars == 0 {
        errors.push(ConfigError::Validation {
            message: "analysis.min_review_chars must be at least 1".to_string(),
        });
    }

    if config.analysis.max_classifier_chars == 0 {
        errors.push(ConfigError::Validation {
            message: "analysis.max_classifier_chars must be at least 1".to_string(),
        });
    }

    if config.analysis.max_key_points == 0 || config.analysis.max_key_points > MAX_KEY_POINTS {
        errors.push(ConfigError::Validation {
            message: format!(
                "analysis.max_key_points must be between 1 and {MAX_KEY_POINTS}, got {}",
                config.analysis.max_key_points
            ),
        });
    }

    for (section, secs) in [
        ("sentiment", config.sentiment.timeout_secs),
        ("gemini", config.gemini.timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{section}.timeout_secs must be at least 1"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&RevlensConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = RevlensConfig::default();
        config.server.host = "  ".into();
        config.storage.database_path = "postgresql://db/reviews".into();
        config.analysis.max_key_points = 9;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3, "got: {errors:?}");
    }

    #[test]
    fn rejects_hostname_with_spaces() {
        let mut config = RevlensConfig::default();
        config.server.host = "local host".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            &errors[0],
            ConfigError::Validation { message } if message.contains("server.host")
        ));
    }

    #[test]
    fn accepts_sqlite_url() {
        let mut config = RevlensConfig::default();
        config.storage.database_path = "sqlite:///./reviews.db".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_zero_timeouts() {
        let mut config = RevlensConfig::default();
        config.gemini.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            &errors[0],
            ConfigError::Validation { message } if message.contains("gemini.timeout_secs")
        ));
    }
}
