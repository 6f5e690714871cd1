// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tokenmeter.toml` > `~/.config/tokenmeter/tokenmeter.toml`
//! > `/etc/tokenmeter/tokenmeter.toml` with environment variable overrides via
//! the `TOKENMETER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TokenmeterConfig;

/// File name searched for in each hierarchy level.
pub const CONFIG_FILE_NAME: &str = "tokenmeter.toml";

/// System-wide configuration path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/tokenmeter/tokenmeter.toml";

/// Per-user configuration path under the platform config dir, if one exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tokenmeter").join(CONFIG_FILE_NAME))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tokenmeter/tokenmeter.toml` (system-wide)
/// 3. `~/.config/tokenmeter/tokenmeter.toml` (user XDG config)
/// 4. `./tokenmeter.toml` (local directory)
/// 5. `PORT`, then `TOKENMETER_*` environment variables
pub fn load_config() -> Result<TokenmeterConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TokenmeterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TokenmeterConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TokenmeterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TokenmeterConfig::default()))
        .merge(Toml::file(path))
        .merge(env_providers())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TokenmeterConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_providers())
}

/// Environment providers: the bare `PORT` convention first, so that an
/// explicit `TOKENMETER_SERVER_PORT` wins over it.
fn env_providers() -> Figment {
    Figment::new()
        .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
        .merge(prefixed_env())
}

/// Create the prefixed environment provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `TOKENMETER_TOKENIZER_BASELINE_ENCODING` must map to
/// `tokenizer.baseline_encoding`, not `tokenizer.baseline.encoding`.
fn prefixed_env() -> Env {
    Env::prefixed("TOKENMETER_").map(|key| {
        // `key` keeps the env var's case with the prefix stripped.
        map_env_key(&key.as_str().to_ascii_lowercase()).into()
    })
}

/// Map a lowercased, prefix-stripped env key onto a dotted config path.
pub fn map_env_key(key: &str) -> String {
    for section in ["server", "tokenizer", "pricing"] {
        if let Some(rest) = key.strip_prefix(section)
            && let Some(field) = rest.strip_prefix('_')
        {
            return format!("{section}.{field}");
        }
    }
    key.to_string()
}
