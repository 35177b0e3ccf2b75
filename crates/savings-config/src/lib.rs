//! savings-config
//!
//! Display preferences and the on-disk location of the savings snapshot.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
