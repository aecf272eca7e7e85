//! REST API module using Axum
//!
//! HTTP endpoints for the wear-monitoring dashboard:
//! - /health — liveness probe
//! - /api/v1/* — lines, histories, predictions, sessions, configuration
//!
//! Every /api/v1 response is wrapped in the envelope from [`envelope`].

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::DashboardState;

use axum::http::Method;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete application router.
pub fn create_app(state: DashboardState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(routes::legacy_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}
