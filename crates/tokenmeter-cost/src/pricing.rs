// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model pricing table.
//!
//! Built once from configuration and never mutated. Entries keep
//! declaration order, which is also the order of per-model report
//! breakdowns. Lookups for identifiers outside the table return the default
//! model's prices.

use std::collections::HashSet;
use std::sync::Arc;

use tokenmeter_config::model::PricingConfig;
use tokenmeter_core::{ModelCatalog, PriceEntry, TokenmeterError};

/// Immutable model id -> price mapping with a default entry.
#[derive(Debug, Clone)]
pub struct PricingTable {
    entries: Vec<(String, PriceEntry)>,
    default_index: usize,
    catalog: Arc<ModelCatalog>,
}

impl PricingTable {
    /// Build a table from ordered `(model, price)` pairs.
    ///
    /// Rejects an empty list, duplicate ids, negative or non-finite prices,
    /// and a default model that is not listed.
    pub fn new(
        entries: Vec<(String, PriceEntry)>,
        default_model: &str,
    ) -> Result<Self, TokenmeterError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for (model, price) in &entries {
            if !seen.insert(model.as_str()) {
                return Err(TokenmeterError::Config(format!(
                    "model `{model}` is priced more than once"
                )));
            }
            for (side, value) in [
                ("input_per_mtok", price.input_per_mtok),
                ("output_per_mtok", price.output_per_mtok),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(TokenmeterError::Config(format!(
                        "model `{model}` has invalid {side} {value}: prices must be finite and non-negative"
                    )));
                }
            }
        }

        let catalog = ModelCatalog::new(
            entries.iter().map(|(model, _)| model.clone()).collect(),
            default_model,
        )?;
        let default_index = entries
            .iter()
            .position(|(model, _)| model == default_model)
            .ok_or_else(|| {
                TokenmeterError::Internal(format!("default model `{default_model}` not indexed"))
            })?;

        Ok(Self {
            entries,
            default_index,
            catalog: Arc::new(catalog),
        })
    }

    pub fn from_config(config: &PricingConfig) -> Result<Self, TokenmeterError> {
        Self::new(config.price_entries(), &config.default_model)
    }

    /// Price for `model`, or the default model's price when it is not listed.
    pub fn lookup(&self, model: &str) -> PriceEntry {
        self.get(model)
            .unwrap_or(self.entries[self.default_index].1)
    }

    /// Price for `model` without the default fallback.
    pub fn get(&self, model: &str) -> Option<PriceEntry> {
        self.entries
            .iter()
            .find(|(m, _)| m == model)
            .map(|(_, price)| *price)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, PriceEntry)> {
        self.entries.iter().map(|(m, p)| (m.as_str(), *p))
    }

    pub fn default_model(&self) -> &str {
        &self.entries[self.default_index].0
    }

    /// The supported-model catalog these prices define.
    pub fn catalog(&self) -> Arc<ModelCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use tokenmeter_test_utils::fixtures::{DEFAULT_MODEL, default_prices};

    use super::*;

    fn table() -> PricingTable {
        PricingTable::new(default_prices(), DEFAULT_MODEL).unwrap()
    }

    #[test]
    fn builtin_config_builds_table() {
        let table = PricingTable::from_config(&PricingConfig::default()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.default_model(), "gpt-4o-mini");
        let models: Vec<_> = table.entries().map(|(m, _)| m).collect();
        assert_eq!(models, vec!["gpt-4o-mini", "gpt-4o", "gpt-4.1-mini"]);
    }

    #[test]
    fn known_model_pricing() {
        let price = table().lookup("gpt-4o");
        assert!((price.input_per_mtok - 5.0).abs() < f64::EPSILON);
        assert!((price.output_per_mtok - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_model_falls_back_to_default() {
        let table = table();
        assert_eq!(table.get("unknown-model-xyz"), None);
        assert_eq!(table.lookup("unknown-model-xyz"), PriceEntry::new(0.15, 0.60));
    }

    #[test]
    fn lookup_is_exact_match() {
        assert_eq!(table().get("GPT-4O"), None);
    }

    #[test]
    fn catalog_follows_entry_order() {
        let table = table();
        let catalog = table.catalog();
        assert_eq!(catalog.default_model(), DEFAULT_MODEL);
        assert!(
            catalog
                .models()
                .iter()
                .map(String::as_str)
                .eq(table.entries().map(|(m, _)| m))
        );
    }

    #[test]
    fn rejects_empty_table() {
        assert!(matches!(
            PricingTable::new(Vec::new(), "gpt-4o-mini"),
            Err(TokenmeterError::Config(_))
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut prices = default_prices();
        prices.push(("gpt-4o".to_string(), PriceEntry::new(1.0, 1.0)));
        let err = PricingTable::new(prices, DEFAULT_MODEL).unwrap_err();
        assert!(err.to_string().contains("more than once"), "got {err}");
    }

    #[test]
    fn rejects_unlisted_default() {
        assert!(PricingTable::new(default_prices(), "gpt-5").is_err());
    }

    #[test]
    fn rejects_negative_and_non_finite_prices() {
        for bad in [-0.01, f64::NAN, f64::INFINITY] {
            let prices = vec![("m".to_string(), PriceEntry::new(0.1, bad))];
            let err = PricingTable::new(prices, "m").unwrap_err();
            assert!(err.to_string().contains("output_per_mtok"), "got {err}");
        }
    }

    #[test]
    fn zero_prices_are_allowed() {
        let prices = vec![("free".to_string(), PriceEntry::new(0.0, 0.0))];
        assert!(PricingTable::new(prices, "free").is_ok());
    }
}
