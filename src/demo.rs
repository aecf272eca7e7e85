//! Seeded demo data generation
//!
//! Populates the store with realistic lines and multi-session verification
//! histories so the dashboard, trend charts and forecasts have something to
//! show on a fresh install. Fully deterministic for a given seed: randomness
//! lives only here and never inside the wear or trend engines.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::info;

use crate::config::PlantConfig;
use crate::session::{record_session, SessionError, SessionRequest};
use crate::storage::ArchiveStore;
use crate::types::{ExtruderType, LineDefinition, MeasurementPoint, ScrewSpec};

const BRANDS: [(&str, &str, &str, &str, &str); 4] = [
    ("Maillefer", "Ø60 x 25D", "VIS-ML-60-25", "Ø45 x 20D", "VIS-ML-45-20"),
    ("Rosendahl", "Ø90 x 30D", "VIS-RS-90-30", "Ø60 x 24D", "VIS-RS-60-24"),
    ("Nokia-Maillefer", "Ø75 x 28D", "VIS-NM-75-28", "Ø50 x 22D", "VIS-NM-50-22"),
    ("Samp", "Ø80 x 26D", "VIS-SP-80-26", "Ø55 x 21D", "VIS-SP-55-21"),
];

const REMARKS: [&str; 5] = [
    "Normal operation",
    "Slight vibrations observed",
    "Next maintenance scheduled",
    "Spare part on order",
    "Accelerated wear observed",
];

const POINTS_PER_SESSION: u32 = 15;

/// Seed the store with `line_count` lines and their verification histories.
///
/// Returns the number of sessions archived. Existing data is left untouched;
/// callers wanting a clean slate clear the store first.
pub fn seed_demo(
    store: &ArchiveStore,
    config: &PlantConfig,
    seed: u64,
    line_count: u32,
) -> Result<usize, SessionError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sessions = 0;

    for number in 1..=line_count {
        for extruder in [ExtruderType::Principal, ExtruderType::Secondary] {
            sessions += seed_extruder_history(store, config, &mut rng, number, extruder)?;
        }

        // Attach a manufacturer definition to most lines
        if let Some(mut line) = store.get_line(&format!("line-{number:02}"))? {
            if number % 5 != 0 {
                let (brand, pd, pr, sd, sr) = BRANDS[(number as usize - 1) % BRANDS.len()];
                line.definition = Some(LineDefinition {
                    brand: brand.to_string(),
                    principal_screw: ScrewSpec {
                        dimensions: pd.to_string(),
                        reference: pr.to_string(),
                    },
                    secondary_screw: ScrewSpec {
                        dimensions: sd.to_string(),
                        reference: sr.to_string(),
                    },
                });
                store.put_line(&line)?;
            }
        }
    }

    info!("Seeded {} demo sessions across {} lines (seed {})", sessions, line_count, seed);
    Ok(sessions)
}

/// Generate 3-6 historical sessions with a slowly drifting deviation.
fn seed_extruder_history(
    store: &ArchiveStore,
    config: &PlantConfig,
    rng: &mut StdRng,
    line_number: u32,
    extruder: ExtruderType,
) -> Result<usize, SessionError> {
    let session_count: i32 = rng.gen_range(3..=6);
    let start_deviation = rng.gen_range(-0.5..0.6);
    let drift_per_session = rng.gen_range(0.0..0.18);
    // Distribution parameters are in écart units; ±0.02 point scatter.
    // Constant non-negative sigma, construction cannot fail.
    #[allow(clippy::expect_used)]
    let noise = Normal::new(0.0, 0.02).expect("constant sigma is valid");

    let mut counter = rng.gen_range(1_000..5_000_u64);
    let first_date = Utc::now() - Duration::days(90 * i64::from(session_count));

    for session in 0..session_count {
        let target = start_deviation + drift_per_session * f64::from(session);
        let points = (1..=POINTS_PER_SESSION)
            .map(|id| synth_point(config, extruder, id, target + noise.sample(rng)))
            .collect();

        let request = SessionRequest {
            line_id: format!("line-{line_number:02}"),
            line_name: None,
            extruder,
            verification_date: Some(first_date + Duration::days(90 * i64::from(session))),
            counter,
            remark: Some(REMARKS[rng.gen_range(0..REMARKS.len())].to_string()),
            created_by: Some("demo-seed".to_string()),
            points,
        };
        record_session(store, config, &request)?;
        counter += rng.gen_range(500..2_000);
    }

    Ok(session_count as usize)
}

/// Invert the wear formulas to produce readings yielding a target deviation.
fn synth_point(
    config: &PlantConfig,
    extruder: ExtruderType,
    id: u32,
    target_deviation: f64,
) -> MeasurementPoint {
    let formulas = config.formulas_for(extruder);
    // Fix screw wear around 6.0 and derive both readings from it
    let screw_wear = 6.0;
    let barrel_wear = screw_wear + target_deviation;
    MeasurementPoint {
        id,
        screw_um: formulas.screw_a - formulas.screw_b - screw_wear,
        barrel_um: (formulas.barrel_c - barrel_wear) * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_same_seed_same_data() {
        let config = PlantConfig::default();

        let dir_a = TempDir::new().unwrap();
        let store_a = ArchiveStore::open(dir_a.path()).unwrap();
        let count_a = seed_demo(&store_a, &config, 42, 4).unwrap();

        let dir_b = TempDir::new().unwrap();
        let store_b = ArchiveStore::open(dir_b.path()).unwrap();
        let count_b = seed_demo(&store_b, &config, 42, 4).unwrap();

        assert_eq!(count_a, count_b);

        let lines_a = store_a.lines().unwrap();
        let lines_b = store_b.lines().unwrap();
        assert_eq!(lines_a.len(), 4);
        for (a, b) in lines_a.iter().zip(&lines_b) {
            // Record uuids and entry dates differ; the measured content must not
            assert_eq!(a.principal.deviation, b.principal.deviation);
            assert_eq!(a.secondary.status, b.secondary.status);
            assert_eq!(a.principal.counter, b.principal.counter);
        }
    }

    #[test]
    fn test_seeded_histories_support_prediction() {
        let config = PlantConfig::default();
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::open(dir.path()).unwrap();
        seed_demo(&store, &config, 7, 2).unwrap();

        let history = store.history("line-01", ExtruderType::Principal).unwrap();
        assert!(history.len() >= 3);
        assert!(crate::trend_engine::predict(&history).is_some());
        for record in &history {
            assert!(record.projections_consistent());
        }
    }
}
