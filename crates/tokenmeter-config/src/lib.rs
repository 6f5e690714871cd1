// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for tokenmeter.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and diagnostic
//! error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use tokenmeter_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("default model: {}", config.pricing.default_model);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TokenmeterConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to miette diagnostics with typo suggestions
pub fn load_and_validate() -> Result<TokenmeterConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from one TOML file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<TokenmeterConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        // Figment records absolute paths as given and resolves relative ones.
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        };
        read_source(&resolved).into_iter().collect()
    })
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<TokenmeterConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

#[allow(clippy::result_large_err)]
fn finish(
    loaded: Result<TokenmeterConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<TokenmeterConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                models = config.pricing.models.len(),
                default_model = %config.pricing.default_model,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut paths = vec![std::path::PathBuf::from(loader::SYSTEM_CONFIG_PATH)];
    paths.extend(loader::user_config_path());
    paths.push(
        std::env::current_dir()
            .map(|d| d.join(loader::CONFIG_FILE_NAME))
            .unwrap_or_else(|_| loader::CONFIG_FILE_NAME.into()),
    );
    paths.iter().filter_map(|p| read_source(p)).collect()
}

fn read_source(path: &Path) -> Option<(String, String)> {
    std::fs::read_to_string(path)
        .ok()
        .map(|content| (path.display().to_string(), content))
}
