//! API route definitions
//!
//! Organizes endpoints for the wear-monitoring dashboard:
//! - /api/v1/status - aggregate line counts
//! - /api/v1/lines - snapshots, histories, predictions
//! - /api/v1/sessions - record a measurement session
//! - /api/v1/config - live formula constants

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, DashboardState};

/// Create all API routes for the dashboard
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/status", get(handlers::get_status))
        .route("/lines", get(handlers::get_lines))
        .route("/lines/:id", get(handlers::get_line))
        .route("/lines/:id/history", get(handlers::get_history))
        .route("/lines/:id/prediction", get(handlers::get_prediction))
        .route("/archive/recent", get(handlers::get_recent_archive))
        .route("/sessions", post(handlers::create_session))
        .route("/config", get(handlers::get_config))
        .route("/config", post(handlers::update_config))
        .with_state(state)
}

/// Legacy health endpoint at root level
pub fn legacy_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::legacy_health_check))
        .with_state(state)
}
