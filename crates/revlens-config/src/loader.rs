// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./revlens.toml` > `~/.config/revlens/revlens.toml` > `/etc/revlens/revlens.toml`
//! with environment variable overrides via the `REVLENS_` prefix and the
//! conventional `DATABASE_URL`, `PORT`, `GEMINI_API_KEY`, `HF_API_TOKEN` names.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RevlensConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/revlens/revlens.toml` (system-wide)
/// 3. `~/.config/revlens/revlens.toml` (user XDG config)
/// 4. `./revlens.toml` (local directory)
/// 5. `REVLENS_*` environment variables
/// 6. `DATABASE_URL`, `PORT`, `GEMINI_API_KEY`, `HF_API_TOKEN`
pub fn load_config() -> Result<RevlensConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RevlensConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RevlensConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RevlensConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RevlensConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(conventional_env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(RevlensConfig::default()))
        .merge(Toml::file("/etc/revlens/revlens.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("revlens/revlens.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("revlens.toml"))
        .merge(env_provider())
        .merge(conventional_env_provider())
}

/// Create the `REVLENS_` environment provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `REVLENS_GEMINI_API_KEY` must map to `gemini.api_key`, not
/// `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("REVLENS_").map(|key| {
        // `key` keeps the env var's case with the prefix stripped.
        // Example: REVLENS_STORAGE_DATABASE_PATH -> "storage_database_path"
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("sentiment_", "sentiment.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("analysis_", "analysis.", 1);
        mapped.into()
    })
}

/// Unprefixed variables commonly set by hosting platforms and `.env` files.
fn conventional_env_provider() -> Env {
    Env::raw()
        .only(&["DATABASE_URL", "PORT", "GEMINI_API_KEY", "HF_API_TOKEN"])
        .map(|key| match key.as_str().to_ascii_lowercase().as_str() {
            "database_url" => "storage.database_path".into(),
            "port" => "server.port".into(),
            "gemini_api_key" => "gemini.api_key".into(),
            "hf_api_token" => "sentiment.api_token".into(),
            other => other.to_string().into(),
        })
}
