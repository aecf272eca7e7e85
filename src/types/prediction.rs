//! Trend engine and advisor output types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of the fitted deviation trend.
///
/// Classified with a ±0.001/day dead zone around zero slope so sensor noise
/// does not flip the direction between sessions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "Increasing"),
            TrendDirection::Decreasing => write!(f, "Decreasing"),
            TrendDirection::Stable => write!(f, "Stable"),
        }
    }
}

/// Output of the trend engine for one line + extruder history.
///
/// Day counts and calendar dates for the threshold crossings are absent when
/// the fitted slope is flat or negative (no forecast when wear is improving).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPrediction {
    /// Fitted deviation change per day
    pub slope: f64,
    pub intercept: f64,
    /// Max deviation of the most recent archived session
    pub current_deviation: f64,
    /// Deviation increase per 1000 machine cycles (counter-based heuristic)
    pub wear_rate_per_1000: f64,
    /// Whole days until the 1.0 "order" threshold is reached
    pub days_to_order: Option<i64>,
    /// Whole days until the 1.1 "replace" forecast threshold is reached
    pub days_to_replace: Option<i64>,
    pub order_date: Option<DateTime<Utc>>,
    pub replace_date: Option<DateTime<Utc>>,
    pub trend: TrendDirection,
    /// Number of historical sessions the fit was computed over
    pub samples: usize,
}

/// Priority of a maintenance recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RecommendationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationPriority::Low => write!(f, "LOW"),
            RecommendationPriority::Medium => write!(f, "MEDIUM"),
            RecommendationPriority::High => write!(f, "HIGH"),
        }
    }
}

/// One prioritized maintenance action suggested by the advisor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub priority: RecommendationPriority,
    pub title: String,
    pub detail: String,
}
