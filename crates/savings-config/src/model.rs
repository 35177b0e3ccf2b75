use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "savings-tracker";

/// Stores user-configurable preferences and storage locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    /// Display-only currency code; amounts themselves carry no currency.
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the snapshot. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    #[serde(default = "Config::default_snapshot_file")]
    pub snapshot_file: String,

    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            data_dir: None,
            snapshot_file: Self::default_snapshot_file(),
            log_filter: Self::default_log_filter(),
        }
    }
}

impl Config {
    pub fn default_snapshot_file() -> String {
        "savings_state.json".into()
    }

    pub fn default_log_filter() -> String {
        "savings_tracker=info".into()
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(APP_DIR_NAME)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.resolve_data_dir().join(&self.snapshot_file)
    }
}
