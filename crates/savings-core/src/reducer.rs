//! Pure state transitions for the savings store.

use serde::{Deserialize, Serialize};

use savings_domain::{Contribution, ContributionPatch, Identifiable, SavingsState};

/// Every mutation the store accepts.
///
/// The serialized form is tagged by `type` (`SET_TARGET`, `ADD_CONTRIBUTION`, ...) so
/// a host UI can submit actions as JSON messages. Unknown tags deserialize into
/// [`Action::Unrecognized`], which [`transition`] treats as a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetTarget { amount: f64 },
    AddContribution { contribution: Contribution },
    EditContribution { id: String, updates: ContributionPatch },
    DeleteContribution { id: String },
    LoadState { state: SavingsState },
    ToggleTheme,
    Reset,
    #[serde(other)]
    Unrecognized,
}

impl Action {
    pub fn set_target(amount: f64) -> Self {
        Action::SetTarget { amount }
    }

    pub fn add(contribution: Contribution) -> Self {
        Action::AddContribution { contribution }
    }

    pub fn edit(id: impl Into<String>, updates: ContributionPatch) -> Self {
        Action::EditContribution {
            id: id.into(),
            updates,
        }
    }

    pub fn delete(id: impl Into<String>) -> Self {
        Action::DeleteContribution { id: id.into() }
    }

    pub fn load(state: SavingsState) -> Self {
        Action::LoadState { state }
    }

    /// Short name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetTarget { .. } => "set_target",
            Action::AddContribution { .. } => "add_contribution",
            Action::EditContribution { .. } => "edit_contribution",
            Action::DeleteContribution { .. } => "delete_contribution",
            Action::LoadState { .. } => "load_state",
            Action::ToggleTheme => "toggle_theme",
            Action::Reset => "reset",
            Action::Unrecognized => "unrecognized",
        }
    }
}

/// Applies `action` to `state` and returns the resulting state.
///
/// The input is never modified. Edits and deletes that name a missing id return an
/// unchanged copy, as does an unrecognized action.
pub fn transition(state: &SavingsState, action: Action) -> SavingsState {
    match action {
        Action::SetTarget { amount } => SavingsState {
            target: amount,
            ..state.clone()
        },
        Action::AddContribution { contribution } => {
            let mut next = state.clone();
            next.contributions.push(contribution);
            next
        }
        Action::EditContribution { id, updates } => {
            let mut next = state.clone();
            for existing in next.contributions.iter_mut().filter(|c| c.id() == id) {
                existing.apply_patch(&updates);
            }
            next
        }
        Action::DeleteContribution { id } => {
            let mut next = state.clone();
            next.contributions.retain(|c| c.id() != id);
            next
        }
        Action::LoadState { state: loaded } => loaded,
        Action::ToggleTheme => {
            let mut next = state.clone();
            next.settings.theme = next.settings.theme.toggled();
            next
        }
        Action::Reset => SavingsState::initial(),
        Action::Unrecognized => state.clone(),
    }
}
