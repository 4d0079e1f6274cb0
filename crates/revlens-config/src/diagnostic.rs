// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge.
//!
//! Unknown keys and bad values are reported with their full dotted path
//! (`server.port`), a source span when the key came from a TOML file, and a
//! suggestion drawn from [`CONFIG_KEYS`]. Keys that arrive from the
//! environment in flat form (`gemini_apikey`) are matched back to their
//! section.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Prefix of the environment variables layered over the TOML files.
pub const ENV_PREFIX: &str = "REVLENS_";

/// Every key `revlens.toml` accepts, grouped by section.
pub const CONFIG_KEYS: &[(&str, &[&str])] = &[
    ("server", &["host", "port", "log_level"]),
    ("storage", &["database_path", "wal_mode"]),
    ("sentiment", &["api_token", "model", "base_url", "timeout_secs"]),
    ("gemini", &["api_key", "model", "base_url", "timeout_secs"]),
    ("analysis", &["min_review_chars", "max_classifier_chars", "max_key_points"]),
];

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no section accepts.
    #[error("unknown configuration key `{key}`{}", origin_suffix(.origin))]
    #[diagnostic(
        code(revlens::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// Dotted path of the rejected key, e.g. `server.prot`.
        key: String,
        /// Dotted path of the closest accepted key.
        suggestion: Option<String>,
        /// Keys accepted where the unknown key appeared.
        valid_keys: String,
        /// Where the key came from when it was not a TOML file.
        origin: Option<String>,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value that does not deserialize into the key's type.
    #[error("invalid type for key `{key}`: found {found}")]
    #[diagnostic(
        code(revlens::config::invalid_type),
        help("expected {expected}; the key can also be set with `{env_var}`")
    )]
    InvalidType {
        key: String,
        found: String,
        expected: String,
        /// Environment variable that sets the same key.
        env_var: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value that parsed but fails a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(revlens::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(revlens::config::other))]
    Other(String),
}

fn origin_suffix(origin: &Option<String>) -> String {
    origin
        .as_ref()
        .map(|o| format!(" (from {o})"))
        .unwrap_or_default()
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Keys accepted in `section`, or `None` for an unknown section.
pub fn section_keys(section: &str) -> Option<&'static [&'static str]> {
    CONFIG_KEYS
        .iter()
        .find(|(name, _)| *name == section)
        .map(|(_, keys)| *keys)
}

/// `server.port` -> `REVLENS_SERVER_PORT`.
pub fn env_var_for(dotted: &str) -> String {
    format!("{ENV_PREFIX}{}", dotted.replace('.', "_").to_ascii_uppercase())
}

/// Convert a `figment::Error` into one `ConfigError` per underlying error.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, _) => {
                // Figment may or may not include the field in the path.
                let mut section = error.path.clone();
                if section.last() == Some(field) {
                    section.pop();
                }
                let section_name = section.first().map(String::as_str);

                let valid_keys = match section_name.and_then(section_keys) {
                    Some(keys) => keys.join(", "),
                    None => CONFIG_KEYS
                        .iter()
                        .map(|(name, _)| *name)
                        .collect::<Vec<_>>()
                        .join(", "),
                };
                let (span, src) = find_source_span(&error, &section, field, toml_sources);

                ConfigError::UnknownKey {
                    key: dotted(&section, field),
                    suggestion: suggest_for(section_name, field),
                    valid_keys,
                    origin: non_file_origin(&error),
                    span,
                    src,
                }
            }
            Kind::InvalidType(actual, expected) => {
                let key = error.path.join(".");
                let (span, src) = match error.path.split_last() {
                    Some((field, section)) => {
                        find_source_span(&error, section, field, toml_sources)
                    }
                    None => (None, None),
                };
                ConfigError::InvalidType {
                    env_var: env_var_for(&key),
                    key,
                    found: actual.to_string(),
                    expected: expected.to_string(),
                    span,
                    src,
                }
            }
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

fn dotted(section: &[String], field: &str) -> String {
    if section.is_empty() {
        field.to_string()
    } else {
        format!("{}.{field}", section.join("."))
    }
}

/// Name of the provider that produced `error`, unless it was a TOML file.
fn non_file_origin(error: &figment::Error) -> Option<String> {
    let metadata = error.metadata.as_ref()?;
    match metadata.source {
        Some(figment::Source::File(_)) => None,
        _ => Some(metadata.name.to_string()),
    }
}

/// Dotted path of the accepted key closest to `unknown`.
///
/// Inside a section, candidates are that section's keys, then the same key
/// name in any other section. At the top level, a flat `section_key` form is
/// matched against the section's keys before falling back to section names
/// or to a bare key that lives in exactly one section.
pub fn suggest_for(section: Option<&str>, unknown: &str) -> Option<String> {
    if let Some(section) = section {
        let keys = section_keys(section)?;
        if let Some(key) = suggest_key(unknown, keys) {
            return Some(format!("{section}.{key}"));
        }
        return owning_section(unknown).map(|owner| format!("{owner}.{unknown}"));
    }

    for (name, keys) in CONFIG_KEYS {
        if let Some(rest) = unknown.strip_prefix(name).and_then(|r| r.strip_prefix('_')) {
            if let Some(key) = suggest_key(rest, keys) {
                return Some(format!("{name}.{key}"));
            }
        }
    }

    let sections: Vec<&str> = CONFIG_KEYS.iter().map(|(name, _)| *name).collect();
    suggest_key(unknown, &sections)
        .or_else(|| owning_section(unknown).map(|owner| format!("{owner}.{unknown}")))
}

/// The only section that accepts `key`, if exactly one does.
fn owning_section(key: &str) -> Option<&'static str> {
    let mut owners = CONFIG_KEYS
        .iter()
        .filter(|(_, keys)| keys.contains(&key))
        .map(|(name, _)| *name);
    match (owners.next(), owners.next()) {
        (Some(owner), None) => Some(owner),
        _ => None,
    }
}

/// Closest entry of `candidates` to `unknown` by Jaro-Winkler similarity.
pub fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|candidate| (strsim::jaro_winkler(unknown, candidate), *candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}

fn find_source_span(
    error: &figment::Error,
    section: &[String],
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let path = match error.metadata.as_ref().and_then(|m| m.source.as_ref()) {
        Some(figment::Source::File(path)) => path.display().to_string(),
        _ => return (None, None),
    };
    let Some((name, content)) = toml_sources.iter().find(|(p, _)| *p == path) else {
        return (None, None);
    };

    match find_key_offset(content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` at the start of a line inside the `[section]` table.
///
/// The search stops at the next table header. Top-level fields are searched
/// before the first header.
pub fn find_key_offset(content: &str, section: &[String], field: &str) -> Option<usize> {
    let wanted_header = (!section.is_empty()).then(|| format!("[{}]", section.join(".")));
    let mut in_section = wanted_header.is_none();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            in_section = wanted_header
                .as_deref()
                .is_some_and(|header| trimmed.trim_end().starts_with(header));
        } else if in_section {
            let is_key = trimmed
                .strip_prefix(field)
                .is_some_and(|after| after.trim_start().starts_with('='));
            if is_key {
                return Some(offset + (line.len() - trimmed.len()));
            }
        }
        offset += line.len();
    }

    None
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RevlensConfig;

    #[test]
    fn key_table_matches_config_model() {
        let defaults = serde_json::to_value(RevlensConfig::default()).unwrap();
        let sections = defaults.as_object().unwrap();
        assert_eq!(sections.len(), CONFIG_KEYS.len());

        for (section, keys) in CONFIG_KEYS {
            let mut actual: Vec<&str> = sections[*section]
                .as_object()
                .unwrap()
                .keys()
                .map(String::as_str)
                .collect();
            let mut expected = keys.to_vec();
            actual.sort_unstable();
            expected.sort_unstable();
            assert_eq!(actual, expected, "section [{section}]");
        }
    }

    #[test]
    fn typo_inside_section() {
        assert_eq!(suggest_for(Some("server"), "prot"), Some("server.port".into()));
        assert_eq!(
            suggest_for(Some("gemini"), "api_kee"),
            Some("gemini.api_key".into())
        );
    }

    #[test]
    fn key_in_wrong_section_points_to_owner() {
        assert_eq!(
            suggest_for(Some("storage"), "max_key_points"),
            Some("analysis.max_key_points".into())
        );
    }

    #[test]
    fn flat_env_shaped_keys_map_back_to_sections() {
        assert_eq!(suggest_for(None, "gemini_api_key"), Some("gemini.api_key".into()));
        assert_eq!(suggest_for(None, "gemini_apikey"), Some("gemini.api_key".into()));
        assert_eq!(
            suggest_for(None, "storage_database_path"),
            Some("storage.database_path".into())
        );
    }

    #[test]
    fn top_level_keys() {
        assert_eq!(suggest_for(None, "storge"), Some("storage".into()));
        assert_eq!(suggest_for(None, "port"), Some("server.port".into()));
        // `model` lives in two sections.
        assert_eq!(suggest_for(None, "model"), None);
        assert_eq!(suggest_for(None, "zzzzzz"), None);
    }

    #[test]
    fn env_var_names() {
        assert_eq!(env_var_for("server.port"), "REVLENS_SERVER_PORT");
        assert_eq!(
            env_var_for("analysis.max_key_points"),
            "REVLENS_ANALYSIS_MAX_KEY_POINTS"
        );
    }

    #[test]
    fn key_offset_stays_inside_its_section() {
        let content = "[storage]\r\nprot = 1\r\n\r\n[server]\r\nhost = \"x\"\r\nprot = 80\r\n";
        let offset = find_key_offset(content, &["server".to_string()], "prot").unwrap();
        assert_eq!(&content[offset..offset + 4], "prot");
        assert!(offset > content.find("[server]").unwrap());
    }

    #[test]
    fn key_offset_ignores_prefix_matches_and_other_sections() {
        let content = "[server]\nport_extra = 1\n\n[gemini]\nport = 2\n";
        assert_eq!(find_key_offset(content, &["server".to_string()], "port"), None);
        assert_eq!(find_key_offset(content, &["analysis".to_string()], "port"), None);
    }

    #[test]
    fn top_level_key_offset() {
        let content = "prot = 1\n[server]\nport = 2\n";
        assert_eq!(find_key_offset(content, &[], "prot"), Some(0));
        assert_eq!(find_key_offset(content, &[], "port"), None);
    }
}
