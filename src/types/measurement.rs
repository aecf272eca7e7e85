//! Measurement capture types: MeasurementPoint, WearFormulaSet, WearCalculation

use serde::{Deserialize, Serialize};

use super::WearStatus;

/// One raw micrometer reading pair at a numbered location along the extruder.
///
/// Point ids are assigned 1..N by the capture form and stay stable for the
/// duration of a session; readings are in micrometers (µm).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MeasurementPoint {
    pub id: u32,
    /// Raw caliper reading on the screw (µm)
    pub screw_um: f64,
    /// Raw reading on the barrel/liner (µm)
    pub barrel_um: f64,
}

/// Calibration constants for one extruder type.
///
/// Screw: `wear = screw_a - screw_b - reading`
/// Barrel: `wear = barrel_c - reading / 100`
///
/// Constants are configuration, never derived. Every archive record carries
/// the exact set that produced it so historical reports stay reproducible
/// after the constants are re-tuned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WearFormulaSet {
    pub screw_a: f64,
    pub screw_b: f64,
    pub barrel_c: f64,
}

impl WearFormulaSet {
    /// Whether all three constants are finite numbers.
    ///
    /// The wear engine itself performs no bounds-checking on constants;
    /// callers validate through this before invoking it.
    pub fn is_finite(&self) -> bool {
        self.screw_a.is_finite() && self.screw_b.is_finite() && self.barrel_c.is_finite()
    }
}

/// Derived wear result for one measurement point.
///
/// All three numeric fields are rounded to 3 decimals at computation time.
/// Rounding is part of the contract: downstream comparisons and aggregates
/// operate on the rounded values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WearCalculation {
    pub point_id: u32,
    pub screw_wear: f64,
    pub barrel_wear: f64,
    /// Écart = barrel wear − screw wear; the primary health indicator
    pub deviation: f64,
    pub status: WearStatus,
}
