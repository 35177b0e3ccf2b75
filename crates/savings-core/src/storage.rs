use std::{collections::HashSet, sync::Mutex};

use tracing::warn;

use savings_domain::SavingsState;

use crate::CoreError;

/// Abstraction over backends that hold the persisted savings snapshot.
pub trait SnapshotStorage: Send + Sync {
    /// Returns the last saved snapshot, or `None` when nothing was saved or the read
    /// failed. Implementations log read failures instead of returning them.
    fn load(&self) -> Option<SavingsState>;
    /// Overwrites the persisted snapshot with `state`.
    fn save(&self, state: &SavingsState) -> Result<(), CoreError>;
    /// Removes the persisted snapshot entirely.
    fn clear(&self) -> Result<(), CoreError>;
}

/// Serializes the full state as a pretty-printed JSON document.
///
/// JSON has no representation for NaN or infinity, so a state holding one is refused
/// rather than written with `null` in place of the number.
pub fn export_snapshot(state: &SavingsState) -> Result<String, CoreError> {
    if !state.target.is_finite() {
        return Err(CoreError::Serde(format!(
            "target {} cannot be stored as JSON",
            state.target
        )));
    }
    if let Some(bad) = state.contributions.iter().find(|c| !c.amount.is_finite()) {
        return Err(CoreError::Serde(format!(
            "contribution {} amount {} cannot be stored as JSON",
            bad.id, bad.amount
        )));
    }
    Ok(serde_json::to_string_pretty(state)?)
}

/// Parses a JSON snapshot produced by [`export_snapshot`].
pub fn import_snapshot(json: &str) -> Result<SavingsState, CoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Detects invariant violations within a loaded snapshot.
pub fn snapshot_warnings(state: &SavingsState) -> Vec<String> {
    let mut warnings = Vec::new();
    if !state.target.is_finite() || state.target < 0.0 {
        warnings.push(format!("target {} is not a non-negative number", state.target));
    }
    let mut seen = HashSet::new();
    for contribution in &state.contributions {
        if !seen.insert(contribution.id.as_str()) {
            warnings.push(format!("duplicate contribution id {}", contribution.id));
        }
        if !(contribution.amount.is_finite() && contribution.amount > 0.0) {
            warnings.push(format!(
                "contribution {} has non-positive amount {}",
                contribution.id, contribution.amount
            ));
        }
        if contribution.parsed_date().is_none() {
            warnings.push(format!(
                "contribution {} has unparseable date `{}`",
                contribution.id, contribution.date
            ));
        }
    }
    warnings
}

/// Keeps the serialized snapshot in memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySnapshotStorage {
    document: Mutex<Option<String>>,
}

impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: &SavingsState) -> Result<Self, CoreError> {
        Ok(Self {
            document: Mutex::new(Some(export_snapshot(state)?)),
        })
    }

    /// Returns the raw JSON currently held, if any.
    pub fn document(&self) -> Option<String> {
        self.document.lock().ok().and_then(|doc| doc.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.document().is_none()
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    fn load(&self) -> Option<SavingsState> {
        let document = self.document()?;
        match import_snapshot(&document) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(error = %err, "in-memory snapshot could not be parsed");
                None
            }
        }
    }

    fn save(&self, state: &SavingsState) -> Result<(), CoreError> {
        let json = export_snapshot(state)?;
        let mut document = self
            .document
            .lock()
            .map_err(|_| CoreError::Storage("snapshot lock poisoned".into()))?;
        *document = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        let mut document = self
            .document
            .lock()
            .map_err(|_| CoreError::Storage("snapshot lock poisoned".into()))?;
        *document = None;
        Ok(())
    }
}
