#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use once_cell::sync::Lazy;
use savings_core::{CoreError, MemorySnapshotStorage, SnapshotStorage};
use savings_tracker::{Config, ContributionDraft, SavingsState};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh temporary directory that outlives the calling test.
pub fn test_base_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates a configuration whose data directory is unique to the calling test.
pub fn setup_test_config() -> Config {
    let base = test_base_dir();
    Config {
        data_dir: Some(base.join("data")),
        ..Config::default()
    }
}

pub fn draft(date: &str, amount: f64) -> ContributionDraft {
    ContributionDraft::new(date, amount)
}

/// In-memory storage that counts calls and can be told to fail saves.
#[derive(Default)]
pub struct RecordingStorage {
    inner: MemorySnapshotStorage,
    saves: AtomicUsize,
    loads: AtomicUsize,
    fail_saves: AtomicBool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: &SavingsState) -> Self {
        Self {
            inner: MemorySnapshotStorage::with_state(state).expect("seed storage"),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        let storage = Self::default();
        storage.fail_saves.store(true, Ordering::SeqCst);
        storage
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_saves.store(failing, Ordering::SeqCst);
    }

    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn load_calls(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn persisted(&self) -> Option<SavingsState> {
        self.inner.load()
    }
}

impl SnapshotStorage for RecordingStorage {
    fn load(&self) -> Option<SavingsState> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load()
    }

    fn save(&self, state: &SavingsState) -> Result<(), CoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("disk full".into()));
        }
        self.inner.save(state)
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.inner.clear()
    }
}
