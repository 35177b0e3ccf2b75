//! savings-core
//!
//! State transitions, derived metrics, and input validation for the savings tracker.
//! Depends on savings-domain. No terminal I/O, no direct filesystem access.

pub mod error;
pub mod format;
pub mod metrics;
pub mod reducer;
pub mod storage;
pub mod time;
pub mod validation;

pub use error::CoreError;
pub use metrics::*;
pub use reducer::{transition, Action};
pub use storage::{MemorySnapshotStorage, SnapshotStorage};
pub use validation::{ContributionDraft, ContributionService, ValidationError};
