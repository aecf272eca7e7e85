//! History types: ArchiveRecord, Line, LineDefinition, DashboardStats

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ExtruderType, MeasurementPoint, WearCalculation, WearFormulaSet, WearStatus};

/// Screw reference data for one extruder of a line definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrewSpec {
    /// e.g. "Ø60 x 25D"
    pub dimensions: String,
    /// Manufacturer part reference, e.g. "VIS-ML-60-25"
    pub reference: String,
}

/// Manufacturer data for a production line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineDefinition {
    pub brand: String,
    pub principal_screw: ScrewSpec,
    pub secondary_screw: ScrewSpec,
}

/// Current snapshot for one extruder of a line.
///
/// All fields are `None` until the first verification session is archived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExtruderSnapshot {
    pub status: Option<WearStatus>,
    /// Machine operating-cycle counter at last verification
    pub counter: Option<u64>,
    /// Max deviation observed at last verification
    pub deviation: Option<f64>,
    pub last_verification: Option<DateTime<Utc>>,
    pub next_verification: Option<DateTime<Utc>>,
}

/// A monitored production line.
///
/// Holds the current per-extruder snapshot only; historical detail lives in
/// the append-only `ArchiveRecord` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Line {
    pub id: String,
    /// e.g. "Line 01"
    pub name: String,
    pub active: bool,
    pub definition: Option<LineDefinition>,
    pub principal: ExtruderSnapshot,
    pub secondary: ExtruderSnapshot,
    pub remark: String,
}

impl Line {
    /// Build a fresh line with no verification history.
    pub fn new(number: u32) -> Self {
        Self {
            id: format!("line-{number:02}"),
            name: format!("Line {number:02}"),
            active: true,
            definition: None,
            principal: ExtruderSnapshot::default(),
            secondary: ExtruderSnapshot::default(),
            remark: String::new(),
        }
    }

    /// Snapshot for the given extruder.
    pub fn snapshot(&self, extruder: ExtruderType) -> &ExtruderSnapshot {
        match extruder {
            ExtruderType::Principal => &self.principal,
            ExtruderType::Secondary => &self.secondary,
        }
    }

    /// Mutable snapshot for the given extruder.
    pub fn snapshot_mut(&mut self, extruder: ExtruderType) -> &mut ExtruderSnapshot {
        match extruder {
            ExtruderType::Principal => &mut self.principal,
            ExtruderType::Secondary => &mut self.secondary,
        }
    }

    /// Worst status across both extruders, if any verification exists.
    pub fn worst_status(&self) -> Option<WearStatus> {
        match (self.principal.status, self.secondary.status) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}

/// Immutable snapshot of one verification session for one line + extruder.
///
/// `overall_status` and `max_deviation` are cached projections of
/// `calculations`; they are computed at construction time and must always be
/// re-derivable through the classifier (see [`Self::projections_consistent`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveRecord {
    pub id: String,
    pub line_id: String,
    pub line_name: String,
    pub line_definition: Option<LineDefinition>,
    pub extruder: ExtruderType,
    pub overall_status: WearStatus,
    /// Date the readings were taken on the shop floor
    pub verification_date: DateTime<Utc>,
    /// Date the session was entered into the system
    pub entry_date: DateTime<Utc>,
    /// Forecast intervention date at save time, if a trend existed
    pub predicted_intervention: Option<DateTime<Utc>>,
    /// Machine operating-cycle counter at verification time
    pub counter: u64,
    pub max_deviation: f64,
    pub measurements: Vec<MeasurementPoint>,
    pub calculations: Vec<WearCalculation>,
    /// Exact constants that produced the calculations (traceability)
    pub formulas: WearFormulaSet,
    pub remark: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

impl ArchiveRecord {
    /// Check the cached projections against the calculations.
    ///
    /// Returns false if `overall_status` or `max_deviation` drifted from
    /// what the classifier derives, which would indicate a corrupted record.
    pub fn projections_consistent(&self) -> bool {
        let statuses: Vec<WearStatus> = self.calculations.iter().map(|c| c.status).collect();
        self.overall_status == crate::wear_engine::classifier::reduce_overall(&statuses)
            && (self.max_deviation
                - crate::wear_engine::classifier::max_deviation(&self.calculations))
            .abs()
                < f64::EPSILON
    }
}

/// Aggregate counts for the dashboard header
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_lines: usize,
    pub lines_ok: usize,
    pub lines_to_order: usize,
    pub lines_to_replace: usize,
    /// Lines whose next scheduled verification date has passed
    pub pending_verifications: usize,
}
