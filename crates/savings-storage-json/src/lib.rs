use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use savings_core::{
    storage::{export_snapshot, import_snapshot, SnapshotStorage},
    CoreError,
};
use savings_domain::SavingsState;
use tracing::{debug, warn};

pub const DEFAULT_SNAPSHOT_FILE: &str = "savings_state.json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence for the savings snapshot.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStorage {
    path: PathBuf,
}

impl JsonSnapshotStorage {
    pub fn new(path: PathBuf) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    /// Stores the snapshot as [`DEFAULT_SNAPSHOT_FILE`] inside `dir`.
    pub fn in_dir(dir: &Path) -> Result<Self, CoreError> {
        Self::new(dir.join(DEFAULT_SNAPSHOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot, distinguishing "never saved" (`Ok(None)`) from read failures.
    pub fn read_snapshot(&self) -> Result<Option<SavingsState>, CoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        import_snapshot(&data).map(Some)
    }

    pub fn write_snapshot(&self, state: &SavingsState) -> Result<(), CoreError> {
        save_snapshot_to_path(state, &self.path)
    }

    pub fn remove_snapshot(&self) -> Result<(), CoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl SnapshotStorage for JsonSnapshotStorage {
    fn load(&self) -> Option<SavingsState> {
        match self.read_snapshot() {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read savings snapshot");
                None
            }
        }
    }

    fn save(&self, state: &SavingsState) -> Result<(), CoreError> {
        self.write_snapshot(state)?;
        debug!(path = %self.path.display(), "savings snapshot written");
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.remove_snapshot()
    }
}

/// Saves a snapshot to an arbitrary path, staging through a temporary file.
pub fn save_snapshot_to_path(state: &SavingsState, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, &export_snapshot(state)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a snapshot from the provided filesystem path.
pub fn load_snapshot_from_path(path: &Path) -> Result<SavingsState, CoreError> {
    let data = fs::read_to_string(path)?;
    import_snapshot(&data)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
