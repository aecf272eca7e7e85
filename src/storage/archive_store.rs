//! Sled-backed archive of verification sessions and line snapshots
//!
//! Two trees:
//! - `archive`: append-only `ArchiveRecord`s keyed
//!   `line_id|extruder|verification_ts|record_id` so a prefix scan returns
//!   one extruder's history in chronological order.
//! - `lines`: current `Line` snapshots keyed by line id.
//!
//! Values are JSON via serde_json. Writes are not flushed individually; sled
//! flushes in the background and losing the last few writes on a crash is
//! acceptable for a system whose inputs are manual measurement sessions.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::types::{ArchiveRecord, ExtruderType, Line};

/// Error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistent store for archive records and line snapshots
#[derive(Clone)]
pub struct ArchiveStore {
    db: Arc<sled::Db>,
    archive: sled::Tree,
    lines: sled::Tree,
}

impl ArchiveStore {
    /// Open or create the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        let archive = db.open_tree("archive")?;
        let lines = db.open_tree("lines")?;
        Ok(Self { db: Arc::new(db), archive, lines })
    }

    /// Key layout: `line_id|extruder_code|zero-padded unix seconds|record id`.
    /// Lexicographic order equals chronological order within one prefix; the
    /// trailing record id keeps same-second re-measurements from colliding.
    fn archive_key(record: &ArchiveRecord) -> Vec<u8> {
        format!(
            "{}|{}|{:020}|{}",
            record.line_id,
            record.extruder.short_code(),
            record.verification_date.timestamp(),
            record.id
        )
        .into_bytes()
    }

    fn history_prefix(line_id: &str, extruder: ExtruderType) -> Vec<u8> {
        format!("{}|{}|", line_id, extruder.short_code()).into_bytes()
    }

    /// Append one verification session to the archive.
    ///
    /// Records are immutable once stored; a later session for the same
    /// line + extruder gets its own key and supersedes nothing, even when
    /// the verification dates are identical.
    pub fn append_record(&self, record: &ArchiveRecord) -> Result<(), StorageError> {
        let key = Self::archive_key(record);
        let value = serde_json::to_vec(record)?;
        self.archive.insert(key, value)?;
        Ok(())
    }

    /// Full history for one line + extruder, ascending by verification date.
    ///
    /// This is the ordering contract the trend engine relies on.
    pub fn history(
        &self,
        line_id: &str,
        extruder: ExtruderType,
    ) -> Result<Vec<ArchiveRecord>, StorageError> {
        let mut records = Vec::new();
        for item in self.archive.scan_prefix(Self::history_prefix(line_id, extruder)) {
            let (_key, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }

    /// Most recent archive records across all lines, newest first.
    pub fn recent_records(&self, limit: usize) -> Result<Vec<ArchiveRecord>, StorageError> {
        let mut records = Vec::with_capacity(limit);
        for item in self.archive.iter().rev() {
            if records.len() >= limit {
                break;
            }
            let (_key, value) = item?;
            // Reverse tree order is not global-date order (keys group by
            // line first), but it is stable and good enough for a feed.
            records.push(serde_json::from_slice::<ArchiveRecord>(&value)?);
        }
        records.sort_by(|a: &ArchiveRecord, b: &ArchiveRecord| {
            b.verification_date.cmp(&a.verification_date)
        });
        Ok(records)
    }

    /// Upsert a line snapshot.
    pub fn put_line(&self, line: &Line) -> Result<(), StorageError> {
        let value = serde_json::to_vec(line)?;
        self.lines.insert(line.id.as_bytes(), value)?;
        Ok(())
    }

    /// Fetch one line snapshot.
    pub fn get_line(&self, line_id: &str) -> Result<Option<Line>, StorageError> {
        match self.lines.get(line_id.as_bytes())? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    /// All line snapshots, ordered by id.
    pub fn lines(&self) -> Result<Vec<Line>, StorageError> {
        let mut lines = Vec::new();
        for item in self.lines.iter() {
            let (_key, value) = item?;
            lines.push(serde_json::from_slice(&value)?);
        }
        Ok(lines)
    }

    /// Total number of archived sessions.
    pub fn record_count(&self) -> usize {
        self.archive.len()
    }

    /// Wipe everything (demo reseeding and tests).
    pub fn clear(&self) -> Result<(), StorageError> {
        self.archive.clear()?;
        self.lines.clear()?;
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use crate::types::{WearFormulaSet, WearStatus};

    fn record(line: &str, extruder: ExtruderType, day: u32, deviation: f64) -> ArchiveRecord {
        let date = Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).single().unwrap();
        ArchiveRecord {
            id: format!("{line}-{day}"),
            line_id: line.to_string(),
            line_name: line.to_uppercase(),
            line_definition: None,
            extruder,
            overall_status: WearStatus::Ok,
            verification_date: date,
            entry_date: date,
            predicted_intervention: None,
            counter: 1000 + u64::from(day),
            max_deviation: deviation,
            measurements: vec![],
            calculations: vec![],
            formulas: WearFormulaSet { screw_a: 75.0, screw_b: 8.94, barrel_c: 64.66 },
            remark: String::new(),
            created_at: date,
            created_by: None,
        }
    }

    #[test]
    fn test_history_is_chronological_and_filtered() {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::open(dir.path()).unwrap();

        // Insert out of order, mixed with another line and extruder
        store.append_record(&record("line-01", ExtruderType::Principal, 20, 0.7)).unwrap();
        store.append_record(&record("line-01", ExtruderType::Principal, 5, 0.5)).unwrap();
        store.append_record(&record("line-01", ExtruderType::Secondary, 10, 0.9)).unwrap();
        store.append_record(&record("line-02", ExtruderType::Principal, 12, 0.3)).unwrap();

        let history = store.history("line-01", ExtruderType::Principal).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].max_deviation, 0.5);
        assert_eq!(history[1].max_deviation, 0.7);
        assert!(history[0].verification_date < history[1].verification_date);
    }

    #[test]
    fn test_same_second_sessions_both_kept() {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::open(dir.path()).unwrap();

        // A re-measurement with the same date-only verification timestamp
        // must not replace the original session.
        let mut first = record("line-04", ExtruderType::Principal, 9, 0.4);
        first.id = "session-a".to_string();
        let mut second = record("line-04", ExtruderType::Principal, 9, 0.6);
        second.id = "session-b".to_string();

        store.append_record(&first).unwrap();
        store.append_record(&second).unwrap();

        let history = store.history("line-04", ExtruderType::Principal).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(store.record_count(), 2);
    }

    #[test]
    fn test_line_snapshot_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::open(dir.path()).unwrap();

        let mut line = Line::new(3);
        line.remark = "spare screw on order".to_string();
        store.put_line(&line).unwrap();

        let loaded = store.get_line("line-03").unwrap().unwrap();
        assert_eq!(loaded, line);
        assert!(store.get_line("line-99").unwrap().is_none());
        assert_eq!(store.lines().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_empties_both_trees() {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::open(dir.path()).unwrap();
        store.append_record(&record("line-01", ExtruderType::Principal, 1, 0.1)).unwrap();
        store.put_line(&Line::new(1)).unwrap();

        store.clear().unwrap();
        assert_eq!(store.record_count(), 0);
        assert!(store.lines().unwrap().is_empty());
    }
}
