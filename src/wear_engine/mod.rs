//! Wear calculation engine
//!
//! Pure, deterministic pipeline turning raw micrometer reading pairs into
//! wear values, a deviation ("écart"), and a per-point status:
//!
//! - Screw wear: `A - B - screw_reading`
//! - Barrel wear: `C - barrel_reading / 100`
//! - Deviation: `barrel_wear - screw_wear`
//!
//! All three outputs are rounded half-away-from-zero to 3 decimals at
//! computation time. The deviation is computed from the already-rounded wear
//! values, not from the raw ones — this matches the reference behavior that
//! downstream aggregates depend on.
//!
//! The engine performs no validation of calibration constants; an invalid
//! formula set is a configuration error handled before this layer. Readings
//! themselves are validated strictly: a non-finite reading is rejected with
//! the offending point id rather than letting NaN leak into the results.

pub mod classifier;

use thiserror::Error;

use crate::types::{MeasurementPoint, WearCalculation, WearFormulaSet};

/// Errors from the wear engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WearError {
    #[error("invalid measurement at point {point_id}: {field} reading is not a finite number")]
    InvalidMeasurement { point_id: u32, field: &'static str },

    #[error("no measurement points provided")]
    EmptyMeasurements,
}

/// Round to 3 decimal places, half away from zero.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Compute wear values for an ordered sequence of measurement points.
///
/// Output index `i` corresponds to input index `i` regardless of point ids;
/// each point is computed independently with no cross-point aggregation.
/// Pure and side-effect free: identical inputs yield identical outputs.
pub fn compute_wear(
    points: &[MeasurementPoint],
    formulas: &WearFormulaSet,
) -> Result<Vec<WearCalculation>, WearError> {
    if points.is_empty() {
        return Err(WearError::EmptyMeasurements);
    }

    points
        .iter()
        .map(|point| {
            if !point.screw_um.is_finite() {
                return Err(WearError::InvalidMeasurement {
                    point_id: point.id,
                    field: "screw",
                });
            }
            if !point.barrel_um.is_finite() {
                return Err(WearError::InvalidMeasurement {
                    point_id: point.id,
                    field: "barrel",
                });
            }

            let screw_wear = round3(formulas.screw_a - formulas.screw_b - point.screw_um);
            let barrel_wear = round3(formulas.barrel_c - point.barrel_um / 100.0);
            // Deviation from the rounded wear values, then rounded again.
            let deviation = round3(barrel_wear - screw_wear);

            Ok(WearCalculation {
                point_id: point.id,
                screw_wear,
                barrel_wear,
                deviation,
                status: classifier::classify(deviation),
            })
        })
        .collect()
}
