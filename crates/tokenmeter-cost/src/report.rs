// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-model usage reports.

use tokenmeter_core::{ModelCost, ModelCosts, UsageReport};
use tokenmeter_tokenizer::{EncodingResolver, count_tokens};
use tracing::debug;

use crate::estimate::estimate_cost;
use crate::pricing::PricingTable;

/// Count `prompt_text` and `response_text` once under the encoding resolved
/// for `requested_model`, then price those counts for every model in
/// `pricing`, in declaration order.
///
/// Every model reuses the same counts even when its own encoding would
/// tokenize differently.
pub fn build_report(
    resolver: &EncodingResolver,
    pricing: &PricingTable,
    prompt_text: &str,
    response_text: Option<&str>,
    requested_model: &str,
) -> UsageReport {
    let resolution = resolver.resolve(requested_model);
    let encoder = resolution.encoder.as_ref();

    let prompt_tokens = count_tokens(prompt_text, encoder);
    let response_tokens = count_tokens(response_text, encoder);
    let total_tokens = prompt_tokens + response_tokens;

    let mut costs = ModelCosts::with_capacity(pricing.len());
    for (model, price) in pricing.entries() {
        costs.push(
            model,
            ModelCost {
                prompt_tokens,
                response_tokens,
                total_tokens,
                estimated_cost_usd: estimate_cost(prompt_tokens, response_tokens, price),
            },
        );
    }

    debug!(
        requested_model,
        effective_model = %resolution.summary.effective_model,
        encoding = %resolution.summary.encoding,
        source = %resolution.summary.source,
        prompt_tokens,
        response_tokens,
        "usage report built"
    );

    UsageReport {
        prompt_tokens,
        response_tokens,
        total_tokens,
        default_model: requested_model.to_string(),
        costs,
        resolution: resolution.summary,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokenmeter_core::{EncodingName, EncodingSource};
    use tokenmeter_test_utils::fixtures::{DEFAULT_MODEL, default_mock_tokenizer, default_prices};
    use tokenmeter_test_utils::{MockEncoder, MockTokenizer};

    use super::*;
    use crate::estimate::estimate_cost_for;

    fn setup() -> (Arc<MockTokenizer>, EncodingResolver, PricingTable) {
        let mock = Arc::new(default_mock_tokenizer());
        let pricing = PricingTable::new(default_prices(), DEFAULT_MODEL).unwrap();
        let resolver =
            EncodingResolver::new(mock.clone(), pricing.catalog(), EncodingName::Cl100kBase)
                .unwrap();
        (mock, resolver, pricing)
    }

    #[test]
    fn counts_each_text_exactly_once() {
        let (mock, resolver, pricing) = setup();
        let report = build_report(&resolver, &pricing, "alpha beta", Some("gamma"), "gpt-4o");

        assert_eq!(mock.encode_calls(), 2);
        assert_eq!(report.costs.len(), 3);
    }

    #[test]
    fn absent_response_is_zero_and_not_encoded() {
        let (mock, resolver, pricing) = setup();
        let report = build_report(&resolver, &pricing, "alpha beta", None, "gpt-4o");

        assert_eq!(report.response_tokens, 0);
        assert_eq!(report.total_tokens, report.prompt_tokens);
        assert_eq!(mock.encode_calls(), 1);
    }

    #[test]
    fn costs_follow_pricing_order_and_share_counts() {
        let (_, resolver, pricing) = setup();
        let report = build_report(&resolver, &pricing, "one two three", Some("four"), "gpt-4o");

        let models: Vec<_> = report.costs.models().collect();
        assert_eq!(models, vec!["gpt-4o-mini", "gpt-4o", "gpt-4.1-mini"]);
        for (model, cost) in report.costs.iter() {
            assert_eq!(cost.prompt_tokens, report.prompt_tokens);
            assert_eq!(cost.response_tokens, report.response_tokens);
            assert_eq!(cost.total_tokens, report.total_tokens);
            assert_eq!(
                cost.estimated_cost_usd,
                estimate_cost_for(&pricing, cost.prompt_tokens, cost.response_tokens, model)
            );
        }
    }

    #[test]
    fn counts_use_requested_models_encoding() {
        let (_, resolver, pricing) = setup();
        let text = "tokenization";

        // gpt-4o maps to o200k_base in the mock; gpt-4.1-mini falls back to cl100k_base.
        let native = build_report(&resolver, &pricing, text, None, "gpt-4o");
        let baseline = build_report(&resolver, &pricing, text, None, "gpt-4.1-mini");

        assert_eq!(
            native.prompt_tokens,
            MockEncoder::expected_count(EncodingName::O200kBase, text)
        );
        assert_eq!(
            baseline.prompt_tokens,
            MockEncoder::expected_count(EncodingName::Cl100kBase, text)
        );
        assert_eq!(baseline.resolution.source, EncodingSource::Baseline);
    }

    #[test]
    fn unsupported_model_is_echoed_verbatim() {
        let (_, resolver, pricing) = setup();
        let report = build_report(&resolver, &pricing, "", Some(""), "unknown-model-xyz");

        assert_eq!(report.default_model, "unknown-model-xyz");
        assert_eq!(report.resolution.effective_model, DEFAULT_MODEL);
        assert!(report.resolution.model_substituted);
        assert_eq!(report.total_tokens, 0);
        assert!(report.costs.iter().all(|(_, c)| c.estimated_cost_usd == 0.0));
    }
}
