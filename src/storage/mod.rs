//! Persistence layer
//!
//! Sled-backed append-only archive of verification sessions plus the current
//! per-line snapshots consumed by the dashboard.

mod archive_store;

pub use archive_store::{ArchiveStore, StorageError};
