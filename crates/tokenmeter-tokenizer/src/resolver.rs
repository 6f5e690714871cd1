// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model identifier to encoder resolution.
//!
//! Two fallbacks apply, in order:
//! 1. An identifier outside the supported catalog is replaced by the
//!    catalog's default model.
//! 2. If the tokenizer capability cannot name or load the effective model's
//!    encoding, the baseline encoding is used.
//!
//! Neither fallback is an error. The [`Resolution`] records which path was
//! taken.

use std::sync::Arc;

use tokenmeter_core::{
    Encoder, EncodingName, EncodingSource, ModelCatalog, ResolutionSummary, TokenizerCapability,
    TokenmeterError,
};
use tracing::{debug, info, warn};

use crate::cache::EncodingCache;

/// A resolved encoder plus how it was chosen.
#[derive(Clone)]
pub struct Resolution {
    pub encoder: Arc<dyn Encoder>,
    pub summary: ResolutionSummary,
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// Resolves model identifiers against a fixed catalog.
pub struct EncodingResolver {
    cache: EncodingCache,
    catalog: Arc<ModelCatalog>,
    baseline: Arc<dyn Encoder>,
}

impl EncodingResolver {
    /// Create a resolver and load the baseline encoding.
    ///
    /// The baseline is loaded eagerly so that [`EncodingResolver::resolve`]
    /// always has an encoder to fall back to; a baseline that cannot load is
    /// a startup error.
    pub fn new(
        capability: Arc<dyn TokenizerCapability>,
        catalog: Arc<ModelCatalog>,
        baseline: EncodingName,
    ) -> Result<Self, TokenmeterError> {
        let cache = EncodingCache::new(capability);
        let baseline = cache.get_or_load(baseline)?;
        info!(
            baseline = %baseline.encoding(),
            models = catalog.models().len(),
            default_model = catalog.default_model(),
            "encoding resolver ready"
        );
        Ok(Self {
            cache,
            catalog,
            baseline,
        })
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn baseline(&self) -> EncodingName {
        self.baseline.encoding()
    }

    pub fn cache(&self) -> &EncodingCache {
        &self.cache
    }

    /// Resolve `model` to an encoder. Never fails.
    pub fn resolve(&self, model: &str) -> Resolution {
        let (effective, substituted) = self.catalog.effective_model(model);
        if substituted {
            debug!(
                requested = model,
                effective, "unsupported model, using default model"
            );
        }

        let native = self
            .cache
            .capability()
            .encoding_for_model(effective)
            .and_then(|encoding| self.cache.get_or_load(encoding));

        let (encoder, source) = match native {
            Ok(encoder) => (encoder, EncodingSource::Native),
            Err(err) => {
                if err.is_unknown_key() {
                    debug!(
                        model = effective,
                        baseline = %self.baseline.encoding(),
                        "no native encoding, falling back to baseline encoding"
                    );
                } else {
                    warn!(
                        model = effective,
                        error = %err,
                        "native encoding failed to load, falling back to baseline encoding"
                    );
                }
                (Arc::clone(&self.baseline), EncodingSource::Baseline)
            }
        };

        Resolution {
            summary: ResolutionSummary {
                requested_model: model.to_string(),
                effective_model: effective.to_string(),
                model_substituted: substituted,
                encoding: encoder.encoding(),
                source,
            },
            encoder,
        }
    }
}

impl std::fmt::Debug for EncodingResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodingResolver")
            .field("catalog", &self.catalog)
            .field("baseline", &self.baseline.encoding())
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use tokenmeter_test_utils::MockTokenizer;
    use tokenmeter_test_utils::fixtures::{default_catalog, default_mock_tokenizer};
    use tracing_test::traced_test;

    use super::*;

    fn resolver_with(mock: Arc<MockTokenizer>) -> EncodingResolver {
        EncodingResolver::new(mock, Arc::new(default_catalog()), EncodingName::Cl100kBase)
            .expect("baseline should load")
    }

    #[test]
    fn supported_model_uses_native_encoding() {
        let resolver = resolver_with(Arc::new(default_mock_tokenizer()));
        let resolution = resolver.resolve("gpt-4o");

        assert_eq!(resolution.summary.effective_model, "gpt-4o");
        assert!(!resolution.summary.model_substituted);
        assert_eq!(resolution.summary.source, EncodingSource::Native);
        assert_eq!(resolution.summary.encoding, EncodingName::O200kBase);
        assert!(!resolution.summary.is_fallback());
    }

    #[traced_test]
    #[test]
    fn unsupported_model_substitutes_default() {
        let resolver = resolver_with(Arc::new(default_mock_tokenizer()));
        let resolution = resolver.resolve("not-a-real-model");

        assert_eq!(resolution.summary.requested_model, "not-a-real-model");
        assert_eq!(resolution.summary.effective_model, "gpt-4o-mini");
        assert!(resolution.summary.model_substituted);
        assert_eq!(resolution.summary.source, EncodingSource::Native);
        assert_eq!(resolution.summary.encoding, EncodingName::O200kBase);
        assert!(logs_contain("unsupported model, using default model"));
    }

    #[traced_test]
    #[test]
    fn unmapped_supported_model_falls_back_to_baseline() {
        let resolver = resolver_with(Arc::new(default_mock_tokenizer()));
        let resolution = resolver.resolve("gpt-4.1-mini");

        assert!(!resolution.summary.model_substituted);
        assert_eq!(resolution.summary.source, EncodingSource::Baseline);
        assert_eq!(resolution.summary.encoding, EncodingName::Cl100kBase);
        assert!(logs_contain("no native encoding, falling back to baseline encoding"));
    }

    #[traced_test]
    #[test]
    fn broken_native_encoding_falls_back_with_warning() {
        let mock = Arc::new(
            default_mock_tokenizer().with_broken_encoding(EncodingName::O200kBase),
        );
        let resolver = resolver_with(mock.clone());
        let resolution = resolver.resolve("gpt-4o-mini");

        assert_eq!(resolution.summary.source, EncodingSource::Baseline);
        assert_eq!(resolution.encoder.encoding(), EncodingName::Cl100kBase);
        assert_eq!(mock.load_count(EncodingName::O200kBase), 1);
        assert!(logs_contain("native encoding failed to load"));
    }

    #[test]
    fn broken_baseline_is_a_startup_error() {
        let mock = Arc::new(MockTokenizer::new().with_broken_encoding(EncodingName::Cl100kBase));
        let result =
            EncodingResolver::new(mock, Arc::new(default_catalog()), EncodingName::Cl100kBase);
        assert!(matches!(result, Err(TokenmeterError::Tokenizer { .. })));
    }

    #[test]
    fn baseline_is_loaded_eagerly_and_shared() {
        let mock = Arc::new(MockTokenizer::new());
        let resolver = resolver_with(mock.clone());
        assert_eq!(mock.load_count(EncodingName::Cl100kBase), 1);
        assert_eq!(resolver.baseline(), EncodingName::Cl100kBase);

        // Nothing is mapped, so every model uses the already loaded baseline.
        for model in ["gpt-4o-mini", "gpt-4o", "gpt-4.1-mini", "other"] {
            let resolution = resolver.resolve(model);
            assert_eq!(resolution.summary.source, EncodingSource::Baseline);
        }
        assert_eq!(mock.load_count(EncodingName::Cl100kBase), 1);
    }

    #[test]
    fn native_encoding_shared_with_baseline_is_not_reloaded() {
        let mock = Arc::new(MockTokenizer::new().with_model("gpt-4o-mini", EncodingName::Cl100kBase));
        let resolver = resolver_with(mock.clone());
        let resolution = resolver.resolve("gpt-4o-mini");

        assert_eq!(resolution.summary.source, EncodingSource::Native);
        assert_eq!(mock.load_count(EncodingName::Cl100kBase), 1);
    }
}
