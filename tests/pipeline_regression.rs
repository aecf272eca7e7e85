//! Pipeline Regression Tests
//!
//! Exercises the full measurement pipeline: wear engine, classifier, session
//! archiving, trend prediction and recommendations, end to end against a
//! temporary sled database.

use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

use wearwatch::config::PlantConfig;
use wearwatch::session::{record_session, SessionRequest};
use wearwatch::storage::ArchiveStore;
use wearwatch::types::{ExtruderType, MeasurementPoint, RecommendationPriority, WearStatus};
use wearwatch::{advisor, trend_engine};

/// Build a measurement point that yields the target deviation under the
/// default principal formulas (A=75, B=8.94, C=64.66), by inverting the
/// wear formulas around a screw wear of 6.0.
fn point_with_deviation(id: u32, deviation: f64) -> MeasurementPoint {
    let config = PlantConfig::default();
    let formulas = config.formulas_for(ExtruderType::Principal);
    let screw_wear = 6.0;
    let barrel_wear = screw_wear + deviation;
    MeasurementPoint {
        id,
        screw_um: formulas.screw_a - formulas.screw_b - screw_wear,
        barrel_um: (formulas.barrel_c - barrel_wear) * 100.0,
    }
}

fn session(
    verification: DateTime<Utc>,
    counter: u64,
    points: Vec<MeasurementPoint>,
) -> SessionRequest {
    SessionRequest {
        line_id: "line-01".to_string(),
        line_name: None,
        extruder: ExtruderType::Principal,
        verification_date: Some(verification),
        counter,
        remark: None,
        created_by: Some("test".to_string()),
        points,
    }
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).single().unwrap()
}

#[test]
fn test_end_to_end_replace_scenario() {
    let dir = TempDir::new().unwrap();
    let store = ArchiveStore::open(dir.path()).unwrap();
    let config = PlantConfig::default();

    // Earlier session so the trend engine has a history to fit
    let first_points: Vec<MeasurementPoint> =
        (1..=15).map(|id| point_with_deviation(id, 0.8)).collect();
    record_session(&store, &config, &session(date(2026, 1, 10), 2_000, first_points)).unwrap();

    // 15 points, 3 of them at or above the 1.0 threshold
    let mut points: Vec<MeasurementPoint> =
        (1..=12).map(|id| point_with_deviation(id, 0.5)).collect();
    points.push(point_with_deviation(13, 1.05));
    points.push(point_with_deviation(14, 1.3));
    points.push(point_with_deviation(15, 1.2));

    let record = record_session(&store, &config, &session(date(2026, 4, 10), 4_500, points))
        .unwrap();

    assert_eq!(record.overall_status, WearStatus::ToReplace);
    assert_eq!(record.max_deviation, 1.3);
    assert_eq!(record.calculations.len(), 15);
    assert!(record.projections_consistent());

    // Status breakdown: 12 OK, 3 to-replace
    let replace_count = record
        .calculations
        .iter()
        .filter(|c| c.status == WearStatus::ToReplace)
        .count();
    assert_eq!(replace_count, 3);

    // The line snapshot reflects the latest session
    let line = store.get_line("line-01").unwrap().unwrap();
    assert_eq!(line.principal.status, Some(WearStatus::ToReplace));
    assert_eq!(line.principal.deviation, Some(1.3));
    assert_eq!(line.worst_status(), Some(WearStatus::ToReplace));

    // Prediction over the archived history exists and triggers the
    // immediate-intervention recommendation at high priority
    let history = store.history("line-01", ExtruderType::Principal).unwrap();
    assert_eq!(history.len(), 2);
    let prediction = trend_engine::predict(&history).unwrap();
    assert_eq!(prediction.current_deviation, 1.3);

    let recommendations = advisor::recommend(&prediction);
    let intervention = recommendations
        .iter()
        .find(|r| r.title.contains("Immediate intervention"))
        .expect("expected an immediate-intervention recommendation");
    assert_eq!(intervention.priority, RecommendationPriority::High);
}

#[test]
fn test_trend_forecast_over_three_sessions() {
    let dir = TempDir::new().unwrap();
    let store = ArchiveStore::open(dir.path()).unwrap();
    let config = PlantConfig::default();

    // Deviation climbing 0.5 -> 0.6 -> 0.7 over 10-day intervals
    for (i, deviation) in [0.5, 0.6, 0.7].iter().enumerate() {
        let points = (1..=5).map(|id| point_with_deviation(id, *deviation)).collect();
        let verification = date(2026, 1, 1) + Duration::days(10 * i as i64);
        record_session(&store, &config, &session(verification, 1_000 * (i as u64 + 1), points))
            .unwrap();
    }

    let history = store.history("line-01", ExtruderType::Principal).unwrap();
    let prediction = trend_engine::predict(&history).unwrap();

    assert!((prediction.slope - 0.01).abs() < 1e-6);
    assert_eq!(prediction.days_to_order, Some(30));
    assert_eq!(prediction.days_to_replace, Some(40));

    // The last archived record carries the forecast intervention date
    let last = history.last().unwrap();
    assert_eq!(last.predicted_intervention, prediction.order_date);
}

#[test]
fn test_first_session_has_no_prediction() {
    let dir = TempDir::new().unwrap();
    let store = ArchiveStore::open(dir.path()).unwrap();
    let config = PlantConfig::default();

    let points = (1..=5).map(|id| point_with_deviation(id, 0.4)).collect();
    let record =
        record_session(&store, &config, &session(date(2026, 2, 1), 1_500, points)).unwrap();

    assert_eq!(record.predicted_intervention, None);
    let history = store.history("line-01", ExtruderType::Principal).unwrap();
    assert!(trend_engine::predict(&history).is_none());
}

#[test]
fn test_formula_traceability_across_config_change() {
    let dir = TempDir::new().unwrap();
    let store = ArchiveStore::open(dir.path()).unwrap();

    let config = PlantConfig::default();
    let points: Vec<MeasurementPoint> = (1..=3).map(|id| point_with_deviation(id, 0.5)).collect();
    let before =
        record_session(&store, &config, &session(date(2026, 1, 5), 1_000, points.clone()))
            .unwrap();

    // Retune the constants and archive another session
    let mut retuned = PlantConfig::default();
    retuned.formulas.principal.barrel_c = 65.0;
    let after = record_session(&store, &retuned, &session(date(2026, 2, 5), 2_000, points))
        .unwrap();

    // Each record carries the exact constants that produced it
    assert_eq!(before.formulas.barrel_c, 64.66);
    assert_eq!(after.formulas.barrel_c, 65.0);
    let history = store.history("line-01", ExtruderType::Principal).unwrap();
    assert_eq!(history[0].formulas, before.formulas);
    assert_eq!(history[1].formulas, after.formulas);
}
