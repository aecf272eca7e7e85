//! Measurement session pipeline
//!
//! Orchestrates one verification session end to end: validate the formula
//! set, run the wear engine, reduce statuses, attach a forecast intervention
//! date, append the immutable archive record, and refresh the line snapshot.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::PlantConfig;
use crate::storage::{ArchiveStore, StorageError};
use crate::trend_engine;
use crate::types::{ArchiveRecord, ExtruderType, Line, MeasurementPoint, WearStatus};
use crate::wear_engine::{self, classifier, WearError};

/// Errors from recording a measurement session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Configuration error surfaced before the wear engine runs
    #[error("formula set for {0} has non-finite constants; fix the plant configuration")]
    InvalidFormulas(ExtruderType),

    #[error(transparent)]
    Wear(#[from] WearError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One measurement session as submitted by the capture form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub line_id: String,
    /// Display name for newly created lines; ignored for existing ones
    pub line_name: Option<String>,
    pub extruder: ExtruderType,
    /// Defaults to now when the form omits it
    pub verification_date: Option<DateTime<Utc>>,
    /// Machine operating-cycle counter at verification time
    pub counter: u64,
    pub remark: Option<String>,
    pub created_by: Option<String>,
    pub points: Vec<MeasurementPoint>,
}

/// Record a verification session and return the archived record.
pub fn record_session(
    store: &ArchiveStore,
    config: &PlantConfig,
    request: &SessionRequest,
) -> Result<ArchiveRecord, SessionError> {
    let formulas = config.formulas_for(request.extruder);
    if !formulas.is_finite() {
        return Err(SessionError::InvalidFormulas(request.extruder));
    }

    let calculations = wear_engine::compute_wear(&request.points, &formulas)?;
    let statuses: Vec<WearStatus> = calculations.iter().map(|c| c.status).collect();
    let overall_status = classifier::reduce_overall(&statuses);
    let max_deviation = classifier::max_deviation(&calculations);

    let now = Utc::now();
    let verification_date = request.verification_date.unwrap_or(now);

    let mut line = store
        .get_line(&request.line_id)?
        .unwrap_or_else(|| new_line(&request.line_id, request.line_name.as_deref()));

    let mut record = ArchiveRecord {
        id: Uuid::new_v4().to_string(),
        line_id: line.id.clone(),
        line_name: line.name.clone(),
        line_definition: line.definition.clone(),
        extruder: request.extruder,
        overall_status,
        verification_date,
        entry_date: now,
        predicted_intervention: None,
        counter: request.counter,
        max_deviation,
        measurements: request.points.clone(),
        calculations,
        formulas,
        remark: request.remark.clone().unwrap_or_default(),
        created_at: now,
        created_by: request.created_by.clone(),
    };

    // Forecast over the history including this session; the order-threshold
    // crossing date becomes the planned intervention date.
    let mut history = store.history(&line.id, request.extruder)?;
    history.push(record.clone());
    history.sort_by(|a, b| a.verification_date.cmp(&b.verification_date));
    record.predicted_intervention =
        trend_engine::predict(&history).and_then(|p| p.order_date);

    store.append_record(&record)?;

    let snapshot = line.snapshot_mut(request.extruder);
    snapshot.status = Some(overall_status);
    snapshot.counter = Some(request.counter);
    snapshot.deviation = Some(max_deviation);
    snapshot.last_verification = Some(verification_date);
    snapshot.next_verification =
        Some(verification_date + Duration::days(config.verification_interval_days));
    if let Some(remark) = &request.remark {
        line.remark.clone_from(remark);
    }
    store.put_line(&line)?;

    info!(
        "Archived session {} for {} {} — status {}, max deviation {:.3}",
        record.id,
        record.line_id,
        record.extruder.short_code(),
        overall_status.short_code(),
        max_deviation
    );

    Ok(record)
}

fn new_line(line_id: &str, name: Option<&str>) -> Line {
    // Accept ids in the canonical "line-NN" shape; anything else becomes a
    // line with the id as its display name.
    let number = line_id
        .strip_prefix("line-")
        .and_then(|n| n.parse::<u32>().ok());
    match number {
        Some(n) => {
            let mut line = Line::new(n);
            if let Some(name) = name {
                line.name = name.to_string();
            }
            line
        }
        None => Line {
            id: line_id.to_string(),
            name: name.unwrap_or(line_id).to_string(),
            active: true,
            definition: None,
            principal: Default::default(),
            secondary: Default::default(),
            remark: String::new(),
        },
    }
}
