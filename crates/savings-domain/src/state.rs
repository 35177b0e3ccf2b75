//! Root savings state and user settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{common::Identifiable, contribution::Contribution};

/// Display theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
}

/// The single root object: annual target, recorded contributions, and settings.
///
/// A `target` of `0` means no target has been set yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsState {
    #[serde(default)]
    pub target: f64,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
    #[serde(default)]
    pub settings: Settings,
}

impl SavingsState {
    /// Zero target, no contributions, light theme.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn has_target(&self) -> bool {
        self.target > 0.0
    }

    pub fn contribution(&self, id: &str) -> Option<&Contribution> {
        self.contributions.iter().find(|c| c.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.contribution(id).is_some()
    }

    /// Equality that compares amounts by bit pattern, so a NaN equals itself.
    pub fn same_as(&self, other: &Self) -> bool {
        self.target.to_bits() == other.target.to_bits()
            && self.settings == other.settings
            && self.contributions.len() == other.contributions.len()
            && self
                .contributions
                .iter()
                .zip(&other.contributions)
                .all(|(a, b)| {
                    a.id == b.id
                        && a.date == b.date
                        && a.note == b.note
                        && a.amount.to_bits() == b.amount.to_bits()
                })
    }
}
