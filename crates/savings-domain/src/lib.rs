//! savings-domain
//!
//! Pure domain models (Contribution, Settings, SavingsState).
//! No I/O, no storage. Only data types and core enums.

pub mod common;
pub mod contribution;
pub mod state;

pub use common::*;
pub use contribution::*;
pub use state::*;
