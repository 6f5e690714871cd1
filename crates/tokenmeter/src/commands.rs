// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot CLI commands: `count`, `estimate`, `report` and `config`.

use std::io::Read;

use tokenmeter_config::TokenmeterConfig;
use tokenmeter_core::TokenmeterError;
use tokenmeter_cost::TokenMeter;

pub fn run_count(
    config: &TokenmeterConfig,
    model: Option<String>,
    text: Option<String>,
) -> Result<(), TokenmeterError> {
    let text = match text {
        Some(text) => text,
        None => read_stdin()?,
    };
    let meter = TokenMeter::from_config(config)?;
    let model = model.unwrap_or_else(|| meter.default_model().to_string());
    println!("{}", meter.count_tokens(&text, &model));
    Ok(())
}

pub fn run_estimate(
    config: &TokenmeterConfig,
    tokens_in: usize,
    tokens_out: usize,
    model: Option<String>,
) -> Result<(), TokenmeterError> {
    println!("{}", estimate(config, tokens_in, tokens_out, model.as_deref())?);
    Ok(())
}

pub fn run_report(
    config: &TokenmeterConfig,
    prompt: &str,
    response: Option<&str>,
    model: Option<String>,
) -> Result<(), TokenmeterError> {
    let meter = TokenMeter::from_config(config)?;
    let model = model.unwrap_or_else(|| meter.default_model().to_string());
    let report = meter.build_usage_report(prompt, response, &model);
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| TokenmeterError::Internal(format!("failed to serialize report: {e}")))?;
    println!("{json}");
    Ok(())
}

pub fn run_config(config: &TokenmeterConfig) -> Result<(), TokenmeterError> {
    print!("{}", render_config(config)?);
    Ok(())
}

/// Pricing needs no vocabulary, so estimates skip loading the tokenizer.
fn estimate(
    config: &TokenmeterConfig,
    tokens_in: usize,
    tokens_out: usize,
    model: Option<&str>,
) -> Result<f64, TokenmeterError> {
    let pricing = tokenmeter_cost::PricingTable::from_config(&config.pricing)?;
    let model = model.unwrap_or(pricing.default_model());
    Ok(tokenmeter_cost::estimate_cost_for(&pricing, tokens_in, tokens_out, model))
}

fn render_config(config: &TokenmeterConfig) -> Result<String, TokenmeterError> {
    toml::to_string_pretty(config)
        .map_err(|e| TokenmeterError::Internal(format!("failed to render configuration: {e}")))
}

fn read_stdin() -> Result<String, TokenmeterError> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| TokenmeterError::Internal(format!("failed to read stdin: {e}")))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_uses_configured_default_model() {
        let config = TokenmeterConfig::default();
        // 1M input tokens of gpt-4o-mini at $0.15/MTok.
        let cost = estimate(&config, 1_000_000, 0, None).unwrap();
        assert!((cost - 0.15).abs() < 1e-12, "got {cost}");
    }

    #[test]
    fn estimate_for_named_model() {
        let config = TokenmeterConfig::default();
        let cost = estimate(&config, 0, 1_000_000, Some("gpt-4o")).unwrap();
        assert!((cost - 15.0).abs() < 1e-12, "got {cost}");
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = TokenmeterConfig::default();
        let rendered = render_config(&config).unwrap();
        assert!(rendered.contains("[server]"));
        assert!(rendered.contains("[[pricing.models]]"));

        let reparsed = tokenmeter_config::load_config_from_str(&rendered).unwrap();
        assert_eq!(reparsed.pricing.models, config.pricing.models);
        assert_eq!(reparsed.server.port, config.server.port);
    }
}
