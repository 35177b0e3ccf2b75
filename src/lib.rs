#![doc(test(attr(deny(warnings))))]

//! Savings Tracker keeps an annual savings target and its contributions, applies user
//! actions through a pure reducer, and persists snapshots in the background.

pub mod errors;
pub mod persistence;
pub mod store;
pub mod utils;

use std::{path::PathBuf, sync::Arc};

pub use savings_config::{Config, ConfigManager};
pub use savings_core::{
    format, metrics, Action, ContributionDraft, ContributionService, CoreError, MonthGroup,
    ProgressSummary, SnapshotStorage, ValidationError,
};
pub use savings_domain::{Contribution, ContributionPatch, SavingsState, Settings, Theme};
pub use savings_storage_json::JsonSnapshotStorage;

pub use errors::{Result, SavingsError};
pub use store::{LoadOutcome, SavingsStore};

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_config(&Config::default());
}

/// Initializes global tracing using the configured log filter.
pub fn init_with_config(config: &Config) {
    utils::init_tracing(&config.log_filter);
}

/// Opens a store backed by the JSON snapshot at [`Config::snapshot_path`], performing
/// the initial load.
pub fn open_with_config(config: &Config) -> Result<SavingsStore> {
    let storage = JsonSnapshotStorage::new(config.snapshot_path())?;
    SavingsStore::open(Arc::new(storage))
}

/// Reads (or creates) `<base>/config/config.json`, initializes tracing from it, and
/// opens the configured store. Returns the effective configuration alongside it.
pub fn open_from_dir(base: PathBuf) -> Result<(Config, SavingsStore)> {
    let manager = ConfigManager::with_base_dir(base)?;
    let config = manager.load_or_init()?;
    init_with_config(&config);
    let store = open_with_config(&config)?;
    Ok((config, store))
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
