//! Student course selections: the only mutable state in the system.
//!
//! The engine never touches storage. Callers own a [`RecordSet`], hand the
//! engine a snapshot slice, and persist through the [`SelectionStore`]
//! boundary, keyed by an opaque name.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::types::CourseRecord;

pub const SNAPSHOT_VERSION: u32 = 1;

/// A persistable snapshot of the record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsSnapshot {
    pub version: u32,
    pub last_updated: DateTime<Utc>,
    pub records: Vec<CourseRecord>,
}

impl RecordsSnapshot {
    pub fn new(records: Vec<CourseRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            last_updated: Utc::now(),
            records,
        }
    }

    /// Reads a snapshot from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let snapshot: RecordsSnapshot =
            serde_json::from_str(&content).map_err(|e| ConfigError::parse(path, e))?;

        debug!(
            "Loaded {} records from {} (last updated {})",
            snapshot.records.len(),
            path.display(),
            snapshot.last_updated
        );

        Ok(snapshot)
    }
}

/// The student's course selections, unique by course id.
///
/// Uniqueness is enforced here, on the mutation paths, not by the engine:
/// snapshots supplied from elsewhere may still carry duplicates, and the
/// engine processes those as-is.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<CourseRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: RecordsSnapshot) -> Self {
        Self {
            records: snapshot.records,
        }
    }

    /// Adds a record, replacing any existing record for the same course id.
    pub fn upsert(&mut self, record: CourseRecord) {
        match self
            .records
            .iter_mut()
            .find(|r| r.course_id == record.course_id)
        {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Removes the record for a course id. Returns false if none existed.
    pub fn remove(&mut self, course_id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.course_id != course_id);
        self.records.len() != before
    }

    pub fn get(&self, course_id: &str) -> Option<&CourseRecord> {
        self.records.iter().find(|r| r.course_id == course_id)
    }

    /// The snapshot slice handed to the engine.
    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_snapshot(&self) -> RecordsSnapshot {
        RecordsSnapshot::new(self.records.clone())
    }
}

/// Caller-owned persistence boundary: load/save snapshots by opaque key.
pub trait SelectionStore {
    fn load(&self, key: &str) -> Option<RecordsSnapshot>;
    fn save(&mut self, key: &str, snapshot: &RecordsSnapshot);
}

/// In-memory store for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, RecordsSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemoryStore {
    fn load(&self, key: &str) -> Option<RecordsSnapshot> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, snapshot: &RecordsSnapshot) {
        debug!("Saving {} records under key '{key}'", snapshot.records.len());
        self.entries.insert(key.to_string(), snapshot.clone());
    }
}
