//! Three-level status classification and reductions
//!
//! The classification is a deliberate three-way split on the 1.0 threshold:
//! strictly below is OK, exactly equal means "order spare parts", strictly
//! above means "replace". The exact-equality branch is narrow (continuous
//! micrometer inputs rarely land exactly on 1.0) but it is the documented
//! reference behavior, so it is preserved literally rather than widened into
//! a tolerance band.

use crate::types::{WearCalculation, WearStatus};

/// Deviation threshold separating OK from order/replace
pub const ORDER_THRESHOLD: f64 = 1.0;

/// Classify a single deviation value.
#[allow(clippy::float_cmp)] // exact-equality branch is the specified contract
pub fn classify(deviation: f64) -> WearStatus {
    if deviation < ORDER_THRESHOLD {
        WearStatus::Ok
    } else if deviation == ORDER_THRESHOLD {
        WearStatus::ToOrder
    } else {
        WearStatus::ToReplace
    }
}

/// Reduce per-point statuses to one overall status, worst wins.
///
/// Priority: `ToReplace > ToOrder > Ok`. An empty list reduces to `Ok`.
pub fn reduce_overall(statuses: &[WearStatus]) -> WearStatus {
    statuses.iter().copied().max().unwrap_or(WearStatus::Ok)
}

/// Maximum deviation across a set of calculations.
///
/// Returns `0.0` for an empty list. This mirrors the reference behavior and
/// is part of the contract, not a silent fallback: a session with no points
/// never reaches this (the engine rejects empty input), but snapshot code
/// may call it on filtered subsets.
pub fn max_deviation(calcs: &[WearCalculation]) -> f64 {
    if calcs.is_empty() {
        return 0.0;
    }
    calcs
        .iter()
        .map(|c| c.deviation)
        .fold(f64::NEG_INFINITY, f64::max)
}
