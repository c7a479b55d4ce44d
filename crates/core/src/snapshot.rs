use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::company::CompanyInfo;
use crate::domain::customer::Customer;
use crate::domain::decision::Decision;
use crate::domain::finance::FinancialMetrics;
use crate::domain::goal::Goal;
use crate::domain::task::Task;

/// Serialized form of [`crate::state::BusinessState`]. Computed metrics are
/// deliberately absent; they are re-derived on rehydration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessSnapshot {
    pub company: CompanyInfo,
    pub tasks: Vec<Task>,
    pub customers: Vec<Customer>,
    pub finances: FinancialMetrics,
    pub goals: Vec<Goal>,
    pub decisions: Vec<Decision>,
    pub as_of: chrono::NaiveDate,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not read snapshot `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not write snapshot `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("snapshot serialization failed: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Persistence boundary for the business state. The store decides the
/// medium; callers only see save/load of whole snapshots.
pub trait SnapshotStore {
    fn save(&mut self, snapshot: &BusinessSnapshot) -> Result<(), SnapshotError>;
    fn load(&self) -> Result<Option<BusinessSnapshot>, SnapshotError>;
}

#[derive(Clone, Debug, Default)]
pub struct InMemorySnapshotStore {
    latest: Option<BusinessSnapshot>,
    saves: usize,
}

impl InMemorySnapshotStore {
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&mut self, snapshot: &BusinessSnapshot) -> Result<(), SnapshotError> {
        self.latest = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<BusinessSnapshot>, SnapshotError> {
        Ok(self.latest.clone())
    }
}

#[derive(Clone, Debug)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn save(&mut self, snapshot: &BusinessSnapshot) -> Result<(), SnapshotError> {
        let encoded = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&self.path, encoded)
            .map_err(|source| SnapshotError::Write { path: self.path.clone(), source })
    }

    fn load(&self) -> Result<Option<BusinessSnapshot>, SnapshotError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SnapshotError::Read { path: self.path.clone(), source }),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::state::{BusinessState, BusinessStateWriter, NewTask, SequentialIdProvider};
    use crate::domain::task::{Owner, Priority};

    use super::{InMemorySnapshotStore, JsonFileSnapshotStore, SnapshotStore};

    fn populated_state() -> BusinessState {
        let anchor = NaiveDate::from_ymd_opt(2026, 1, 8).expect("valid anchor");
        let mut state =
            BusinessState::with_ids(anchor, Box::new(SequentialIdProvider::new("id")));
        state
            .add_task(NewTask {
                title: "call the investor".to_string(),
                priority: Priority::Medium,
                owner: Owner::You,
                due_date: None,
                agent: None,
            })
            .expect("task");
        state
    }

    #[test]
    fn in_memory_store_returns_latest_snapshot() {
        let state = populated_state();
        let mut store = InMemorySnapshotStore::default();
        store.save(&state.snapshot()).expect("save");

        let loaded = store.load().expect("load").expect("snapshot present");
        assert_eq!(loaded, state.snapshot());
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn file_store_round_trips_json() {
        let dir = TempDir::new().expect("temp dir");
        let mut store = JsonFileSnapshotStore::new(dir.path().join("state.json"));
        let state = populated_state();

        store.save(&state.snapshot()).expect("save");
        let loaded = store.load().expect("load").expect("snapshot present");
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].title, "call the investor");
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileSnapshotStore::new(dir.path().join("absent.json"));
        assert!(store.load().expect("load").is_none());
    }
}
