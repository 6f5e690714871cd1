// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for tokenmeter.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokenmeter_core::{EncodingName, ModelCatalog, PriceEntry, TokenmeterError};

/// Top-level tokenmeter configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to the built-in pricing table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenmeterConfig {
    /// HTTP server and logging settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Tokenizer settings.
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    /// Supported models and their prices.
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the HTTP API to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP API to.
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
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Tokenizer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Encoding used when a model's own encoding cannot be resolved.
    #[serde(default = "default_baseline_encoding")]
    pub baseline_encoding: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            baseline_encoding: default_baseline_encoding(),
        }
    }
}

impl TokenizerConfig {
    /// Parse the configured baseline encoding name.
    pub fn baseline(&self) -> Result<EncodingName, TokenmeterError> {
        EncodingName::from_str(self.baseline_encoding.trim()).map_err(|_| {
            TokenmeterError::UnknownEncoding {
                name: self.baseline_encoding.clone(),
            }
        })
    }
}

fn default_baseline_encoding() -> String {
    EncodingName::Cl100kBase.to_string()
}

/// Supported model list and pricing table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Model substituted for unsupported identifiers, for both encoding
    /// selection and price lookup. Must appear in `models`.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Supported models in report order.
    #[serde(default = "default_models")]
    pub models: Vec<ModelPricingConfig>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            models: default_models(),
        }
    }
}

impl PricingConfig {
    /// Build the immutable supported-model catalog.
    pub fn catalog(&self) -> Result<ModelCatalog, TokenmeterError> {
        ModelCatalog::new(
            self.models.iter().map(|m| m.id.clone()).collect(),
            self.default_model.clone(),
        )
    }

    /// Model ids paired with their price entries, in declaration order.
    pub fn price_entries(&self) -> Vec<(String, PriceEntry)> {
        self.models
            .iter()
            .map(|m| (m.id.clone(), PriceEntry::new(m.input_per_mtok, m.output_per_mtok)))
            .collect()
    }
}

/// One supported model and its price per million tokens (USD).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelPricingConfig {
    /// Model identifier, matched exactly against request input.
    pub id: String,

    /// USD per million input tokens.
    pub input_per_mtok: f64,

    /// USD per million output tokens.
    pub output_per_mtok: f64,
}

impl ModelPricingConfig {
    fn new(id: &str, input_per_mtok: f64, output_per_mtok: f64) -> Self {
        Self {
            id: id.to_string(),
            input_per_mtok,
            output_per_mtok,
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_models() -> Vec<ModelPricingConfig> {
    vec![
        ModelPricingConfig::new("gpt-4o-mini", 0.15, 0.60),
        ModelPricingConfig::new("gpt-4o", 5.00, 15.00),
        ModelPricingConfig::new("gpt-4.1-mini", 0.30, 1.20),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pricing_has_three_models_in_order() {
        let pricing = PricingConfig::default();
        let ids: Vec<_> = pricing.models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["gpt-4o-mini", "gpt-4o", "gpt-4.1-mini"]);
        assert_eq!(pricing.default_model, "gpt-4o-mini");
    }

    #[test]
    fn default_catalog_builds() {
        let catalog = PricingConfig::default().catalog().unwrap();
        assert_eq!(catalog.default_model(), "gpt-4o-mini");
        assert_eq!(catalog.models().len(), 3);
    }

    #[test]
    fn price_entries_follow_declaration_order() {
        let entries = PricingConfig::default().price_entries();
        assert_eq!(entries[1].0, "gpt-4o");
        assert!((entries[1].1.input_per_mtok - 5.0).abs() < f64::EPSILON);
        assert!((entries[1].1.output_per_mtok - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn baseline_encoding_parses() {
        let tokenizer = TokenizerConfig::default();
        assert_eq!(tokenizer.baseline().unwrap(), EncodingName::Cl100kBase);

        let bad = TokenizerConfig {
            baseline_encoding: "cl100k".into(),
        };
        assert!(matches!(
            bad.baseline(),
            Err(TokenmeterError::UnknownEncoding { .. })
        ));
    }
}
