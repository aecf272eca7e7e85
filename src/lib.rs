//! WearWatch: Extruder Wear Monitoring
//!
//! Maintenance-tracking service for extruder screw ("vis") and barrel
//! ("chemise") wear across production lines.
//!
//! ## Architecture
//!
//! - **Wear Engine**: Pure wear/deviation calculations with 3-decimal rounding
//! - **Classifier**: Three-level status (OK / to order / to replace)
//! - **Trend Engine**: OLS regression over deviation history, threshold forecasts
//! - **Advisor**: Rule-based maintenance recommendations
//! - **Storage**: Append-only sled archive of verification sessions
//! - **API**: Axum REST endpoints for the dashboard

pub mod advisor;
pub mod api;
pub mod config;
pub mod demo;
pub mod session;
pub mod storage;
pub mod trend_engine;
pub mod types;
pub mod wear_engine;

// Re-export configuration
pub use config::{ConfigError, FormulaConfig, PlantConfig};

// Re-export commonly used types
pub use types::{
    ArchiveRecord, DashboardStats, ExtruderType, Line, LineDefinition, MeasurementPoint,
    Recommendation, RecommendationPriority, TrendDirection, TrendPrediction, WearCalculation,
    WearFormulaSet, WearStatus,
};

// Re-export the pipeline entry points
pub use session::{record_session, SessionError, SessionRequest};
pub use wear_engine::{compute_wear, WearError};

// Re-export storage
pub use storage::{ArchiveStore, StorageError};
