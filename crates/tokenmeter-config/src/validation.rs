// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints that serde attributes cannot express: the
//! pricing table must be a well-formed closed set, the baseline encoding must
//! be one the tokenizer knows, and so on.

use std::collections::HashSet;

use strum::VariantNames;
use tokenmeter_core::EncodingName;

use crate::diagnostic::ConfigError;
use crate::model::TokenmeterConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TokenmeterConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    let level = config.server.log_level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::unknown_value(
            "server.log_level",
            &config.server.log_level,
            LOG_LEVELS,
        ));
    }

    if config.tokenizer.baseline().is_err() {
        errors.push(ConfigError::unknown_value(
            "tokenizer.baseline_encoding",
            &config.tokenizer.baseline_encoding,
            EncodingName::VARIANTS,
        ));
    }

    validate_pricing(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_pricing(config: &TokenmeterConfig, errors: &mut Vec<ConfigError>) {
    let pricing = &config.pricing;

    if pricing.models.is_empty() {
        errors.push(ConfigError::Validation {
            message: "pricing.models must list at least one model".to_string(),
        });
        return;
    }

    let mut seen = HashSet::new();
    for (i, model) in pricing.models.iter().enumerate() {
        if model.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("pricing.models[{i}].id must not be empty"),
            });
        } else if !seen.insert(model.id.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate model id `{}` in [[pricing.models]]", model.id),
            });
        }

        for (field, price) in [
            ("input_per_mtok", model.input_per_mtok),
            ("output_per_mtok", model.output_per_mtok),
        ] {
            if !price.is_finite() || price < 0.0 {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "pricing.models[{i}].{field} must be a non-negative number, got {price}"
                    ),
                });
            }
        }
    }

    if !pricing.models.iter().any(|m| m.id == pricing.default_model) {
        let ids: Vec<&str> = pricing.models.iter().map(|m| m.id.as_str()).collect();
        errors.push(ConfigError::unknown_value(
            "pricing.default_model",
            &pricing.default_model,
            &ids,
        ));
    }
}
