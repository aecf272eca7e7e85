//! API route handlers
//!
//! Request handling for the dashboard endpoints: line snapshots and stats,
//! verification histories, trend predictions with recommendations, session
//! recording, and live formula configuration.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::advisor;
use crate::config::{FormulaConfig, PlantConfig};
use crate::session::{record_session, SessionError, SessionRequest};
use crate::storage::ArchiveStore;
use crate::trend_engine;
use crate::types::{
    DashboardStats, ExtruderType, Recommendation, TrendPrediction, WearStatus,
};

use super::envelope::{ApiErrorResponse, ApiResponse};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers.
///
/// The configuration sits behind an `ArcSwap`: reads are lock-free and a
/// formula update replaces the whole object atomically, so every computation
/// sees one consistent constant set.
#[derive(Clone)]
pub struct DashboardState {
    pub config: Arc<ArcSwap<PlantConfig>>,
    pub store: ArchiveStore,
}

impl DashboardState {
    pub fn new(config: PlantConfig, store: ArchiveStore) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            store,
        }
    }
}

// ============================================================================
// Health & Stats
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Legacy liveness probe at the root level.
pub async fn legacy_health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "wearwatch",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/v1/status — aggregate dashboard counts.
pub async fn get_status(State(state): State<DashboardState>) -> Response {
    let lines = match state.store.lines() {
        Ok(lines) => lines,
        Err(err) => return storage_error(&err),
    };

    let now = Utc::now();
    let mut stats = DashboardStats {
        total_lines: lines.len(),
        ..DashboardStats::default()
    };
    for line in &lines {
        match line.worst_status() {
            Some(WearStatus::Ok) => stats.lines_ok += 1,
            Some(WearStatus::ToOrder) => stats.lines_to_order += 1,
            Some(WearStatus::ToReplace) => stats.lines_to_replace += 1,
            None => {}
        }
        let due = [&line.principal, &line.secondary]
            .iter()
            .any(|s| s.next_verification.is_some_and(|next| next <= now));
        if due {
            stats.pending_verifications += 1;
        }
    }

    ApiResponse::ok(stats)
}

// ============================================================================
// Lines & History
// ============================================================================

/// GET /api/v1/lines
pub async fn get_lines(State(state): State<DashboardState>) -> Response {
    match state.store.lines() {
        Ok(lines) => ApiResponse::ok(lines),
        Err(err) => storage_error(&err),
    }
}

/// GET /api/v1/lines/:id
pub async fn get_line(
    State(state): State<DashboardState>,
    Path(line_id): Path<String>,
) -> Response {
    match state.store.get_line(&line_id) {
        Ok(Some(line)) => ApiResponse::ok(line),
        Ok(None) => ApiErrorResponse::not_found(format!("unknown line {line_id}")),
        Err(err) => storage_error(&err),
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtruderQuery {
    /// "principal" (default) or "secondary"
    pub extruder: Option<String>,
}

fn parse_extruder(query: &ExtruderQuery) -> Result<ExtruderType, Response> {
    match &query.extruder {
        None => Ok(ExtruderType::Principal),
        Some(raw) => ExtruderType::parse(raw).ok_or_else(|| {
            ApiErrorResponse::bad_request(format!("unknown extruder type '{raw}'"))
        }),
    }
}

/// GET /api/v1/lines/:id/history?extruder=
pub async fn get_history(
    State(state): State<DashboardState>,
    Path(line_id): Path<String>,
    Query(query): Query<ExtruderQuery>,
) -> Response {
    let extruder = match parse_extruder(&query) {
        Ok(extruder) => extruder,
        Err(response) => return response,
    };
    match state.store.history(&line_id, extruder) {
        Ok(records) => ApiResponse::ok(records),
        Err(err) => storage_error(&err),
    }
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/archive/recent?limit= — newest sessions across all lines.
pub async fn get_recent_archive(
    State(state): State<DashboardState>,
    Query(query): Query<RecentQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(50).min(500);
    match state.store.recent_records(limit) {
        Ok(records) => ApiResponse::ok(records),
        Err(err) => storage_error(&err),
    }
}

// ============================================================================
// Prediction & Recommendations
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub line_id: String,
    pub extruder: ExtruderType,
    /// Absent when fewer than 2 sessions exist for this extruder
    pub prediction: Option<TrendPrediction>,
    pub recommendations: Vec<Recommendation>,
}

/// GET /api/v1/lines/:id/prediction?extruder=
pub async fn get_prediction(
    State(state): State<DashboardState>,
    Path(line_id): Path<String>,
    Query(query): Query<ExtruderQuery>,
) -> Response {
    let extruder = match parse_extruder(&query) {
        Ok(extruder) => extruder,
        Err(response) => return response,
    };
    let history = match state.store.history(&line_id, extruder) {
        Ok(records) => records,
        Err(err) => return storage_error(&err),
    };

    let prediction = trend_engine::predict(&history);
    let recommendations = prediction
        .as_ref()
        .map(advisor::recommend)
        .unwrap_or_default();

    ApiResponse::ok(PredictionResponse {
        line_id,
        extruder,
        prediction,
        recommendations,
    })
}

// ============================================================================
// Sessions
// ============================================================================

/// POST /api/v1/sessions — record one measurement session.
pub async fn create_session(
    State(state): State<DashboardState>,
    Json(request): Json<SessionRequest>,
) -> Response {
    let config = state.config.load_full();
    match record_session(&state.store, &config, &request) {
        Ok(record) => ApiResponse::ok(record),
        Err(err @ (SessionError::Wear(_) | SessionError::InvalidFormulas(_))) => {
            ApiErrorResponse::unprocessable(err.to_string())
        }
        Err(SessionError::Storage(err)) => storage_error(&err),
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub formulas: FormulaConfig,
    pub verification_interval_days: i64,
}

/// GET /api/v1/config — active formula constants.
pub async fn get_config(State(state): State<DashboardState>) -> Response {
    let config = state.config.load();
    ApiResponse::ok(ConfigResponse {
        formulas: config.formulas,
        verification_interval_days: config.verification_interval_days,
    })
}

#[derive(Debug, Deserialize)]
pub struct ConfigUpdate {
    pub formulas: Option<FormulaConfig>,
    pub verification_interval_days: Option<i64>,
}

/// POST /api/v1/config — update constants, validated before the swap.
pub async fn update_config(
    State(state): State<DashboardState>,
    Json(update): Json<ConfigUpdate>,
) -> Response {
    let mut candidate: PlantConfig = state.config.load_full().as_ref().clone();
    if let Some(formulas) = update.formulas {
        candidate.formulas = formulas;
    }
    if let Some(days) = update.verification_interval_days {
        candidate.verification_interval_days = days;
    }

    if let Err(err) = candidate.validate() {
        return ApiErrorResponse::unprocessable(err.to_string());
    }

    let response = ConfigResponse {
        formulas: candidate.formulas,
        verification_interval_days: candidate.verification_interval_days,
    };
    state.config.store(Arc::new(candidate));
    ApiResponse::ok(response)
}

// ============================================================================
// Helpers
// ============================================================================

fn storage_error(err: &crate::storage::StorageError) -> Response {
    warn!("storage error while handling request: {err}");
    ApiErrorResponse::internal(err.to_string())
}
