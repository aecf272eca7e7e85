//! Shared data structures for the wear-monitoring pipeline
//!
//! This module defines the core types flowing through the system:
//! - Measurement capture: `MeasurementPoint`, `WearFormulaSet`
//! - Wear engine output: `WearCalculation`, `WearStatus`
//! - History: `ArchiveRecord`, `Line`, `LineDefinition`
//! - Trend engine output: `TrendPrediction`, `TrendDirection`
//! - Advisor output: `Recommendation`, `RecommendationPriority`

mod status;
mod measurement;
mod archive;
mod prediction;

pub use status::*;
pub use measurement::*;
pub use archive::*;
pub use prediction::*;
