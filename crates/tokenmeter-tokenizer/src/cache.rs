// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide memoization of loaded encodings.
//!
//! Loading an encoding parses its vocabulary and builds merge tables, which is
//! far more expensive than counting. The first caller for an encoding loads it
//! while holding that key's shard lock; concurrent callers for the same key
//! wait and then share the result. Failed loads are not cached.

use std::sync::Arc;

use dashmap::DashMap;
use tokenmeter_core::{Encoder, EncodingName, TokenizerCapability, TokenmeterError};
use tracing::debug;

/// Encoding name -> loaded encoder.
pub struct EncodingCache {
    capability: Arc<dyn TokenizerCapability>,
    entries: DashMap<EncodingName, Arc<dyn Encoder>>,
}

impl EncodingCache {
    pub fn new(capability: Arc<dyn TokenizerCapability>) -> Self {
        Self {
            capability,
            entries: DashMap::new(),
        }
    }

    /// The capability encodings are loaded from.
    pub fn capability(&self) -> &dyn TokenizerCapability {
        self.capability.as_ref()
    }

    /// Return the encoder for `encoding`, loading it on first use.
    pub fn get_or_load(&self, encoding: EncodingName) -> Result<Arc<dyn Encoder>, TokenmeterError> {
        if let Some(hit) = self.entries.get(&encoding) {
            return Ok(Arc::clone(hit.value()));
        }

        let entry = self.entries.entry(encoding).or_try_insert_with(|| {
            debug!(%encoding, "loading encoding");
            self.capability.load_encoding(encoding)
        })?;
        Ok(Arc::clone(entry.value()))
    }

    pub fn is_loaded(&self, encoding: EncodingName) -> bool {
        self.entries.contains_key(&encoding)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for EncodingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let loaded: Vec<String> = self.entries.iter().map(|e| e.key().to_string()).collect();
        f.debug_struct("EncodingCache")
            .field("loaded", &loaded)
            .finish()
    }
}
