//! Rule-based maintenance recommendations
//!
//! Deterministic decision table over a [`TrendPrediction`]. The urgency rules
//! (1-3) are mutually exclusive, first match wins; the wear-rate and
//! stable-trend rules fire independently and can co-occur. Always yields at
//! least one recommendation.

use crate::types::{Recommendation, RecommendationPriority, TrendDirection, TrendPrediction};
use crate::wear_engine::classifier::ORDER_THRESHOLD;

/// Days-to-order below which parts should be ordered immediately
const ORDER_SOON_DAYS: i64 = 30;

/// Days-to-order below which preventive maintenance should be planned
const PLAN_AHEAD_DAYS: i64 = 90;

/// Wear rate per 1000 cycles above which production conditions are suspect
const HIGH_WEAR_RATE: f64 = 0.1;

/// Generate prioritized maintenance actions from a prediction.
pub fn recommend(prediction: &TrendPrediction) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if prediction.current_deviation >= ORDER_THRESHOLD {
        recs.push(Recommendation {
            priority: RecommendationPriority::High,
            title: "Immediate intervention required".to_string(),
            detail: format!(
                "Current deviation ({:.2}) exceeds the critical threshold. Schedule replacement.",
                prediction.current_deviation
            ),
        });
    } else if let Some(days) = prediction.days_to_order {
        if days < ORDER_SOON_DAYS {
            recs.push(Recommendation {
                priority: RecommendationPriority::High,
                title: "Order spare parts now".to_string(),
                detail: format!(
                    "The order threshold is forecast in {days} days. Anticipate the order."
                ),
            });
        } else if days < PLAN_AHEAD_DAYS {
            recs.push(Recommendation {
                priority: RecommendationPriority::Medium,
                title: "Plan preventive maintenance".to_string(),
                detail: format!(
                    "The order threshold is forecast in ~{} months. Add it to the schedule.",
                    (days as f64 / 30.0).round() as i64
                ),
            });
        }
    }

    if prediction.wear_rate_per_1000 > HIGH_WEAR_RATE {
        recs.push(Recommendation {
            priority: RecommendationPriority::Medium,
            title: "High wear rate detected".to_string(),
            detail: format!(
                "Wear of {:.3} per 1000 cycles. Check production conditions.",
                prediction.wear_rate_per_1000
            ),
        });
    }

    if prediction.trend == TrendDirection::Stable {
        recs.push(Recommendation {
            priority: RecommendationPriority::Low,
            title: "Stable trend".to_string(),
            detail: "Wear is stable. Maintain the regular monitoring schedule.".to_string(),
        });
    }

    if recs.is_empty() {
        recs.push(Recommendation {
            priority: RecommendationPriority::Low,
            title: "No immediate action".to_string(),
            detail: "All indicators are within limits. Continue monitoring.".to_string(),
        });
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction() -> TrendPrediction {
        TrendPrediction {
            slope: 0.005,
            intercept: 0.4,
            current_deviation: 0.6,
            wear_rate_per_1000: 0.05,
            days_to_order: None,
            days_to_replace: None,
            order_date: None,
            replace_date: None,
            trend: TrendDirection::Increasing,
            samples: 4,
        }
    }

    #[test]
    fn test_immediate_intervention_at_threshold() {
        let p = TrendPrediction { current_deviation: 1.0, ..prediction() };
        let recs = recommend(&p);
        assert_eq!(recs[0].priority, RecommendationPriority::High);
        assert!(recs[0].title.contains("Immediate intervention"));
    }

    #[test]
    fn test_order_soon_wins_over_plan_ahead() {
        let p = TrendPrediction { days_to_order: Some(20), ..prediction() };
        let recs = recommend(&p);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, RecommendationPriority::High);
        assert!(recs[0].title.contains("Order spare parts"));
    }

    #[test]
    fn test_plan_ahead_window() {
        let p = TrendPrediction { days_to_order: Some(60), ..prediction() };
        let recs = recommend(&p);
        assert_eq!(recs[0].priority, RecommendationPriority::Medium);
        assert!(recs[0].title.contains("preventive maintenance"));
    }

    #[test]
    fn test_distant_forecast_no_urgency_rule() {
        let p = TrendPrediction { days_to_order: Some(200), ..prediction() };
        let recs = recommend(&p);
        // No urgency rule fires; falls through to the fallback
        assert_eq!(recs.len(), 1);
        assert!(recs[0].title.contains("No immediate action"));
    }

    #[test]
    fn test_high_wear_rate_co_occurs_with_urgency() {
        let p = TrendPrediction {
            days_to_order: Some(20),
            wear_rate_per_1000: 0.2,
            ..prediction()
        };
        let recs = recommend(&p);
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().any(|r| r.title.contains("Order spare parts")));
        assert!(recs.iter().any(|r| r.title.contains("High wear rate")));
    }

    #[test]
    fn test_stable_trend_low_priority() {
        let p = TrendPrediction { trend: TrendDirection::Stable, ..prediction() };
        let recs = recommend(&p);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, RecommendationPriority::Low);
        assert!(recs[0].title.contains("Stable"));
    }

    #[test]
    fn test_always_at_least_one_recommendation() {
        let recs = recommend(&prediction());
        assert!(!recs.is_empty());
    }
}
