// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pricing, cost estimation and usage reports for tokenmeter.
//!
//! This crate provides:
//! - **Pricing table**: immutable per-model prices with a default-model fallback
//! - **Cost estimator**: token counts to USD, rounded to six decimals
//! - **Report builder**: one count, priced for every supported model
//! - **`TokenMeter`**: the facade the gateway and CLI call into

pub mod estimate;
pub mod meter;
pub mod pricing;
pub mod report;

pub use estimate::{estimate_cost, estimate_cost_for, round_usd};
pub use meter::TokenMeter;
pub use pricing::PricingTable;
pub use report::build_report;
