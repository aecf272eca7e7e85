//! Trend and prediction engine
//!
//! Fits a linear model over the deviation history of one line + extruder and
//! projects the dates at which the order (1.0) and replace (1.1) thresholds
//! will be crossed, plus a counter-based wear-rate heuristic.
//!
//! The replace forecast target (1.1) is intentionally distinct from the
//! classifier's rule, where anything above 1.0 is already "to replace": the
//! forecast answers "when will the deviation clearly exceed the threshold",
//! the classifier answers "what is the state right now". The two constants
//! are kept separate on purpose.

pub mod regression;

use chrono::Duration;

use crate::types::{ArchiveRecord, TrendDirection, TrendPrediction};
use regression::linear_fit;

/// Deviation target for the "order spare parts" forecast
pub const ORDER_FORECAST_THRESHOLD: f64 = 1.0;

/// Deviation target for the "replace" forecast
pub const REPLACE_FORECAST_THRESHOLD: f64 = 1.1;

/// Dead zone around zero slope when classifying the trend direction.
/// Avoids noise-driven flip-flopping between increasing and decreasing.
pub const TREND_EPSILON: f64 = 0.001;

/// Longest forecast horizon, in days. A flat history can fit to a slope of
/// ~1e-17 from float noise alone; extrapolating that to a crossing date
/// yields day counts that overflow date arithmetic and mean nothing to a
/// maintenance planner. Crossings further out than this are reported as
/// "no forecast".
pub const MAX_FORECAST_DAYS: i64 = 3_650;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Predict threshold crossings from an ordered verification history.
///
/// `history` must be the records of a single line + extruder, sorted
/// ascending by verification date; filtering and sorting are the caller's
/// responsibility. Returns `None` for fewer than 2 records — a new line with
/// a single session is an expected case, not an error.
pub fn predict(history: &[ArchiveRecord]) -> Option<TrendPrediction> {
    if history.len() < 2 {
        return None;
    }

    // x = fractional days since the first record, y = session max deviation
    let first_date = history[0].verification_date;
    let samples: Vec<(f64, f64)> = history
        .iter()
        .map(|record| {
            let elapsed = (record.verification_date - first_date).num_seconds() as f64
                / SECONDS_PER_DAY;
            (elapsed, record.max_deviation)
        })
        .collect();

    let fit = linear_fit(&samples);

    let last = &history[history.len() - 1];
    let current_deviation = last.max_deviation;
    let last_date = last.verification_date;

    let days_to_order = days_to_threshold(ORDER_FORECAST_THRESHOLD, current_deviation, fit.slope);
    let days_to_replace =
        days_to_threshold(REPLACE_FORECAST_THRESHOLD, current_deviation, fit.slope);

    // Counter-based wear rate per 1000 machine cycles
    let counter_delta = last.counter as i64 - history[0].counter as i64;
    let wear_rate_per_1000 = if counter_delta > 0 {
        (current_deviation - history[0].max_deviation) / counter_delta as f64 * 1000.0
    } else {
        0.0
    };

    let trend = if fit.slope > TREND_EPSILON {
        TrendDirection::Increasing
    } else if fit.slope < -TREND_EPSILON {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    Some(TrendPrediction {
        slope: fit.slope,
        intercept: fit.intercept,
        current_deviation,
        wear_rate_per_1000,
        days_to_order,
        days_to_replace,
        order_date: days_to_order.map(|days| last_date + Duration::days(days)),
        replace_date: days_to_replace.map(|days| last_date + Duration::days(days)),
        trend,
        samples: history.len(),
    })
}

/// Days until the deviation reaches `threshold` by linear extrapolation.
///
/// Only valid when wear is increasing (`slope > 0`) and the crossing lies in
/// the future but within [`MAX_FORECAST_DAYS`]; otherwise there is no
/// forecast. The horizon cap also keeps the crossing date representable.
fn days_to_threshold(threshold: f64, current_deviation: f64, slope: f64) -> Option<i64> {
    if slope <= 0.0 {
        return None;
    }
    let days = (threshold - current_deviation) / slope;
    if days > 0.0 && days <= MAX_FORECAST_DAYS as f64 {
        Some(days.round() as i64)
    } else {
        None
    }
}
