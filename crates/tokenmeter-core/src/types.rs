// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the tokenizer, cost and gateway crates.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString, VariantNames};

use crate::error::TokenmeterError;

/// Byte-pair encoding families known to the tokenizer capability.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
)]
pub enum EncodingName {
    /// GPT-4o, GPT-4.1 and o-series models.
    #[strum(serialize = "o200k_base")]
    #[serde(rename = "o200k_base")]
    O200kBase,
    /// GPT-4 and GPT-3.5 generation; the usual baseline.
    #[strum(serialize = "cl100k_base")]
    #[serde(rename = "cl100k_base")]
    Cl100kBase,
    #[strum(serialize = "p50k_base")]
    #[serde(rename = "p50k_base")]
    P50kBase,
    #[strum(serialize = "p50k_edit")]
    #[serde(rename = "p50k_edit")]
    P50kEdit,
    #[strum(serialize = "r50k_base")]
    #[serde(rename = "r50k_base")]
    R50kBase,
    #[strum(serialize = "gpt2")]
    #[serde(rename = "gpt2")]
    Gpt2,
}

/// Per-model pricing in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Cost per million input (prompt) tokens.
    pub input_per_mtok: f64,
    /// Cost per million output (response) tokens.
    pub output_per_mtok: f64,
}

impl PriceEntry {
    pub const fn new(input_per_mtok: f64, output_per_mtok: f64) -> Self {
        Self {
            input_per_mtok,
            output_per_mtok,
        }
    }
}

/// The closed list of supported model identifiers plus the default model.
///
/// Declaration order is preserved and is the iteration order used for
/// per-model report breakdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<String>,
    default_model: String,
}

impl ModelCatalog {
    /// Build a catalog. The default model must be one of `models`.
    pub fn new(models: Vec<String>, default_model: impl Into<String>) -> Result<Self, TokenmeterError> {
        let default_model = default_model.into();
        if models.is_empty() {
            return Err(TokenmeterError::Config(
                "model catalog must contain at least one model".to_string(),
            ));
        }
        if !models.iter().any(|m| *m == default_model) {
            return Err(TokenmeterError::Config(format!(
                "default model `{default_model}` is not in the supported model list"
            )));
        }
        Ok(Self {
            models,
            default_model,
        })
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    /// Map a caller-supplied identifier onto the supported set.
    ///
    /// Returns the identifier itself when supported, otherwise the default
    /// model. The flag is `true` when a substitution happened.
    pub fn effective_model<'a>(&'a self, model: &'a str) -> (&'a str, bool) {
        if self.contains(model) {
            (model, false)
        } else {
            (&self.default_model, true)
        }
    }
}

/// Where the encoder used for a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EncodingSource {
    /// The effective model's own encoding, as reported by the capability.
    Native,
    /// The configured baseline encoding, used because the capability could
    /// not resolve or load the model's own encoding.
    Baseline,
}

/// Outcome of resolving a model identifier to an encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    /// The identifier the caller asked for, unmodified.
    pub requested_model: String,
    /// The supported identifier actually used for encoding selection.
    pub effective_model: String,
    /// `true` when `requested_model` was outside the supported set.
    pub model_substituted: bool,
    /// The encoding that produced the counts.
    pub encoding: EncodingName,
    pub source: EncodingSource,
}

impl ResolutionSummary {
    /// Whether any fallback path was taken.
    pub fn is_fallback(&self) -> bool {
        self.model_substituted || self.source == EncodingSource::Baseline
    }
}

/// Token counts and cost for one model in a usage report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelCost {
    pub prompt_tokens: usize,
    pub response_tokens: usize,
    pub total_tokens: usize,
    pub estimated_cost_usd: f64,
}

/// Ordered per-model cost breakdown.
///
/// Serializes as a JSON object whose keys follow catalog declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCosts(Vec<(String, ModelCost)>);

impl ModelCosts {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, model: impl Into<String>, cost: ModelCost) {
        self.0.push((model.into(), cost));
    }

    pub fn get(&self, model: &str) -> Option<&ModelCost> {
        self.0.iter().find(|(m, _)| m == model).map(|(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelCost)> {
        self.0.iter().map(|(m, c)| (m.as_str(), c))
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(m, _)| m.as_str())
    }
}

impl Serialize for ModelCosts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (model, cost) in &self.0 {
            map.serialize_entry(model, cost)?;
        }
        map.end()
    }
}

/// Token usage and multi-model cost estimate for one prompt/response pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageReport {
    pub prompt_tokens: usize,
    pub response_tokens: usize,
    pub total_tokens: usize,
    /// The model the caller asked for, echoed verbatim even when unsupported.
    pub default_model: String,
    pub costs: ModelCosts,
    /// How the counting encoding was chosen. Not part of the wire format.
    #[serde(skip)]
    pub resolution: ResolutionSummary,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn catalog() -> ModelCatalog {
        ModelCatalog::new(
            vec!["gpt-4o-mini".into(), "gpt-4o".into(), "gpt-4.1-mini".into()],
            "gpt-4o-mini",
        )
        .unwrap()
    }

    #[test]
    fn encoding_name_round_trips_through_strings() {
        for name in EncodingName::VARIANTS {
            let parsed = EncodingName::from_str(name).expect("should parse back");
            assert_eq!(parsed.to_string(), *name);
        }
        assert_eq!(EncodingName::Cl100kBase.to_string(), "cl100k_base");
        assert_eq!(EncodingName::O200kBase.to_string(), "o200k_base");
    }

    #[test]
    fn encoding_name_serde_uses_tiktoken_names() {
        let json = serde_json::to_string(&EncodingName::P50kEdit).unwrap();
        assert_eq!(json, "\"p50k_edit\"");
        let parsed: EncodingName = serde_json::from_str("\"gpt2\"").unwrap();
        assert_eq!(parsed, EncodingName::Gpt2);
    }

    #[test]
    fn catalog_rejects_missing_default() {
        let err = ModelCatalog::new(vec!["a".into()], "b").unwrap_err();
        assert!(err.to_string().contains("`b`"));
    }

    #[test]
    fn catalog_rejects_empty_list() {
        assert!(ModelCatalog::new(vec![], "a").is_err());
    }

    #[test]
    fn effective_model_substitutes_unknown_ids() {
        let catalog = catalog();
        assert_eq!(catalog.effective_model("gpt-4o"), ("gpt-4o", false));
        assert_eq!(
            catalog.effective_model("not-a-real-model"),
            ("gpt-4o-mini", true)
        );
        // Lookup is exact; no case folding.
        assert_eq!(catalog.effective_model("GPT-4o"), ("gpt-4o-mini", true));
    }

    #[test]
    fn model_costs_serialize_in_declaration_order() {
        let cost = ModelCost {
            prompt_tokens: 1,
            response_tokens: 0,
            total_tokens: 1,
            estimated_cost_usd: 0.0,
        };
        let mut costs = ModelCosts::default();
        costs.push("zeta", cost);
        costs.push("alpha", cost);
        let json = serde_json::to_string(&costs).unwrap();
        let zeta = json.find("zeta").unwrap();
        let alpha = json.find("alpha").unwrap();
        assert!(zeta < alpha, "keys should keep insertion order: {json}");
    }

    #[test]
    fn usage_report_wire_format_omits_resolution() {
        let mut costs = ModelCosts::default();
        costs.push(
            "gpt-4o-mini",
            ModelCost {
                prompt_tokens: 2,
                response_tokens: 0,
                total_tokens: 2,
                estimated_cost_usd: 0.0,
            },
        );
        let report = UsageReport {
            prompt_tokens: 2,
            response_tokens: 0,
            total_tokens: 2,
            default_model: "gpt-4o-mini".into(),
            costs,
            resolution: ResolutionSummary {
                requested_model: "gpt-4o-mini".into(),
                effective_model: "gpt-4o-mini".into(),
                model_substituted: false,
                encoding: EncodingName::O200kBase,
                source: EncodingSource::Native,
            },
        };
        let value = serde_json::to_value(&report).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "costs",
                "default_model",
                "prompt_tokens",
                "response_tokens",
                "total_tokens"
            ]
        );
        assert_eq!(value["costs"]["gpt-4o-mini"]["total_tokens"], 2);
    }

    #[test]
    fn resolution_summary_flags_fallbacks() {
        let mut summary = ResolutionSummary {
            requested_model: "gpt-4o".into(),
            effective_model: "gpt-4o".into(),
            model_substituted: false,
            encoding: EncodingName::O200kBase,
            source: EncodingSource::Native,
        };
        assert!(!summary.is_fallback());
        summary.source = EncodingSource::Baseline;
        assert!(summary.is_fallback());
        assert_eq!(EncodingSource::Baseline.to_string(), "baseline");
    }
}
