// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `TokenMeter` facade.
//!
//! Bundles the encoding resolver and pricing table built at startup and
//! exposes the three entry points: token counting, cost estimation and usage
//! reports. Cheap to clone; clones share the same encoding cache.

use std::sync::Arc;

use tokenmeter_config::TokenmeterConfig;
use tokenmeter_core::{
    EncodingName, ModelCatalog, TokenizerCapability, TokenmeterError, UsageReport,
};
use tokenmeter_tokenizer::{EncodingResolver, Resolution, TiktokenCapability, count_tokens};

use crate::estimate::estimate_cost_for;
use crate::pricing::PricingTable;
use crate::report::build_report;

#[derive(Debug, Clone)]
pub struct TokenMeter {
    resolver: Arc<EncodingResolver>,
    pricing: Arc<PricingTable>,
}

impl TokenMeter {
    /// Wire a meter from validated configuration using the bundled tiktoken
    /// vocabularies.
    pub fn from_config(config: &TokenmeterConfig) -> Result<Self, TokenmeterError> {
        let pricing = PricingTable::from_config(&config.pricing)?;
        let baseline = config.tokenizer.baseline()?;
        Self::with_capability(Arc::new(TiktokenCapability::new()), pricing, baseline)
    }

    /// Wire a meter over any tokenizer capability.
    ///
    /// Fails only if the baseline encoding cannot be loaded.
    pub fn with_capability(
        capability: Arc<dyn TokenizerCapability>,
        pricing: PricingTable,
        baseline: EncodingName,
    ) -> Result<Self, TokenmeterError> {
        let resolver = EncodingResolver::new(capability, pricing.catalog(), baseline)?;
        Ok(Self {
            resolver: Arc::new(resolver),
            pricing: Arc::new(pricing),
        })
    }

    /// Tokens `text` produces under the encoding resolved for `model`.
    pub fn count_tokens(&self, text: &str, model: &str) -> usize {
        let resolution = self.resolver.resolve(model);
        count_tokens(text, resolution.encoder.as_ref())
    }

    /// Estimated USD cost for the given counts under `model`'s pricing.
    pub fn estimate_cost(&self, tokens_in: usize, tokens_out: usize, model: &str) -> f64 {
        estimate_cost_for(&self.pricing, tokens_in, tokens_out, model)
    }

    /// Token usage and a cost breakdown for every supported model.
    pub fn build_usage_report(
        &self,
        prompt_text: &str,
        response_text: Option<&str>,
        model: &str,
    ) -> UsageReport {
        build_report(
            &self.resolver,
            &self.pricing,
            prompt_text,
            response_text,
            model,
        )
    }

    /// Resolve `model` without counting anything.
    pub fn resolve(&self, model: &str) -> Resolution {
        self.resolver.resolve(model)
    }

    pub fn default_model(&self) -> &str {
        self.pricing.default_model()
    }

    pub fn catalog(&self) -> &ModelCatalog {
        self.resolver.catalog()
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }
}
