//! The long-lived savings store: single owner of the in-memory state.
//!
//! Hosts construct one [`SavingsStore`] at startup and pass it by reference to
//! whatever needs to read state or dispatch actions.

use std::sync::Arc;

use savings_core::{
    storage::{export_snapshot, import_snapshot, snapshot_warnings},
    transition,
    validation::validate_target,
    Action, ContributionDraft, ContributionService, CoreError, ProgressSummary, SnapshotStorage,
};
use savings_domain::{SavingsState, Theme};
use tracing::{debug, info, warn};

use crate::{
    errors::Result,
    persistence::{PersistenceStats, PersistenceWorker},
};

/// Result of the one-time startup load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A persisted snapshot replaced the in-memory state.
    Restored,
    /// Nothing usable was persisted; the store keeps its current state.
    Fresh,
    /// The initial load already ran; nothing was read.
    AlreadyLoaded,
}

pub struct SavingsStore {
    state: SavingsState,
    storage: Arc<dyn SnapshotStorage>,
    worker: PersistenceWorker,
    initial_load_finished: bool,
}

impl SavingsStore {
    /// Creates a store holding the initial state. Saves stay disabled until
    /// [`SavingsStore::load_initial`] has run.
    pub fn new(storage: Arc<dyn SnapshotStorage>) -> Result<Self> {
        let worker = PersistenceWorker::spawn(Arc::clone(&storage))?;
        Ok(Self {
            state: SavingsState::initial(),
            storage,
            worker,
            initial_load_finished: false,
        })
    }

    /// Creates a store and immediately performs the initial load.
    pub fn open(storage: Arc<dyn SnapshotStorage>) -> Result<Self> {
        let mut store = Self::new(storage)?;
        store.load_initial();
        Ok(store)
    }

    /// Makes the single startup load attempt and enables saving afterwards,
    /// whether or not a snapshot was found.
    pub fn load_initial(&mut self) -> LoadOutcome {
        if self.initial_load_finished {
            return LoadOutcome::AlreadyLoaded;
        }
        let outcome = match self.storage.load() {
            Some(snapshot) => {
                for warning in snapshot_warnings(&snapshot) {
                    warn!(%warning, "loaded snapshot violates an invariant");
                }
                if !self.state.same_as(&SavingsState::initial()) {
                    warn!("changes made before the initial load were replaced by the snapshot");
                }
                info!(
                    contributions = snapshot.contributions.len(),
                    "restored savings snapshot"
                );
                self.state = transition(&self.state, Action::load(snapshot));
                LoadOutcome::Restored
            }
            None => {
                info!("no savings snapshot found; starting from initial state");
                LoadOutcome::Fresh
            }
        };
        self.initial_load_finished = true;
        if outcome == LoadOutcome::Fresh && !self.state.same_as(&SavingsState::initial()) {
            // Changes dispatched while the load was pending have not been written yet.
            self.worker.request_save(self.state.clone());
        }
        outcome
    }

    pub fn is_loaded(&self) -> bool {
        self.initial_load_finished
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &SavingsState {
        &self.state
    }

    /// Applies `action`, returning whether the state changed.
    ///
    /// A change queues a background save once the initial load has finished.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let kind = action.kind();
        let next = transition(&self.state, action);
        if next.same_as(&self.state) {
            debug!(action = kind, "action left state unchanged");
            return false;
        }
        self.state = next;
        if self.initial_load_finished {
            self.worker.request_save(self.state.clone());
        } else {
            debug!(action = kind, "initial load pending; save deferred");
        }
        true
    }

    /// Sets a validated, positive annual target.
    pub fn set_target(&mut self, amount: f64) -> Result<()> {
        let target = validate_target(amount)?;
        self.dispatch(Action::set_target(target));
        Ok(())
    }

    /// Validates the draft, records it, and returns the new contribution id.
    pub fn add_contribution(&mut self, draft: ContributionDraft) -> Result<String> {
        let contribution = ContributionService::create(draft)?;
        let id = contribution.id.clone();
        self.dispatch(Action::add(contribution));
        Ok(id)
    }

    /// Rewrites an existing contribution from a validated draft.
    ///
    /// Unlike a raw [`Action::EditContribution`], an unknown id is reported.
    pub fn edit_contribution(&mut self, id: &str, draft: ContributionDraft) -> Result<()> {
        if !self.state.contains(id) {
            return Err(CoreError::ContributionNotFound(id.to_string()).into());
        }
        let patch = ContributionService::patch(draft)?;
        self.dispatch(Action::edit(id, patch));
        Ok(())
    }

    /// Removes a contribution; returns `false` when the id was unknown.
    pub fn delete_contribution(&mut self, id: &str) -> bool {
        self.dispatch(Action::delete(id))
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.dispatch(Action::ToggleTheme);
        self.state.settings.theme
    }

    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }

    /// Resets to the initial state and removes the persisted snapshot.
    ///
    /// Refused (returns `false`) until the initial load has run, so a snapshot is never
    /// deleted before it was read.
    pub fn clear_persisted(&mut self) -> bool {
        if !self.initial_load_finished {
            warn!("initial load pending; refusing to clear the persisted snapshot");
            return false;
        }
        self.state = transition(&self.state, Action::Reset);
        self.worker.request_clear();
        true
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(export_snapshot(&self.state)?)
    }

    /// Replaces the whole state with an imported snapshot.
    ///
    /// Invariant violations in the document are logged and returned, not rejected.
    pub fn import_json(&mut self, json: &str) -> Result<Vec<String>> {
        let imported = import_snapshot(json)?;
        let warnings = snapshot_warnings(&imported);
        for warning in &warnings {
            warn!(%warning, "imported snapshot violates an invariant");
        }
        self.dispatch(Action::load(imported));
        Ok(warnings)
    }

    pub fn progress(&self) -> ProgressSummary {
        ProgressSummary::from_state(&self.state)
    }

    /// Blocks until every save queued so far has been attempted.
    pub fn flush(&self) {
        self.worker.flush();
    }

    pub fn persistence_stats(&self) -> PersistenceStats {
        self.worker.stats()
    }
}
