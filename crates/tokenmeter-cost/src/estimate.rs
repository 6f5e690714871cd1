// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cost estimation.
//!
//! Formula: `tokens_in / 1e6 * input_per_mtok + tokens_out / 1e6 * output_per_mtok`,
//! rounded to whole micro-dollars (six decimal places, ties to even).

use tokenmeter_core::PriceEntry;

use crate::pricing::PricingTable;

const TOKENS_PER_MTOK: f64 = 1_000_000.0;
const USD_SCALE: f64 = 1_000_000.0;

/// Estimated USD cost of `tokens_in` prompt and `tokens_out` response tokens.
pub fn estimate_cost(tokens_in: usize, tokens_out: usize, price: PriceEntry) -> f64 {
    let input = (tokens_in as f64 / TOKENS_PER_MTOK) * price.input_per_mtok;
    let output = (tokens_out as f64 / TOKENS_PER_MTOK) * price.output_per_mtok;
    round_usd(input + output)
}

/// Like [`estimate_cost`], pricing `model` through `table` (with its default
/// fallback).
pub fn estimate_cost_for(
    table: &PricingTable,
    tokens_in: usize,
    tokens_out: usize,
    model: &str,
) -> f64 {
    estimate_cost(tokens_in, tokens_out, table.lookup(model))
}

/// Round to six decimal places, ties to even.
pub fn round_usd(value: f64) -> f64 {
    (value * USD_SCALE).round_ties_even() / USD_SCALE
}
