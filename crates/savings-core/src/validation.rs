//! Input rules for contributions and targets, applied before anything reaches the store.

use thiserror::Error;
use uuid::Uuid;

use savings_domain::{parse_iso_date, Contribution, ContributionPatch};

use crate::{time::Clock, CoreError};

/// Longest note accepted on a contribution, counted in characters.
pub const MAX_NOTE_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("amount must be a positive number, got {0}")]
    NonPositiveAmount(f64),
    #[error("date is required")]
    MissingDate,
    #[error("date `{0}` is not a valid calendar date")]
    InvalidDate(String),
    #[error("note must be at most {max} characters, got {len}")]
    NoteTooLong { len: usize, max: usize },
    #[error("target must be a positive number, got {0}")]
    NonPositiveTarget(f64),
}

/// Raw contribution values as entered by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionDraft {
    pub date: String,
    pub amount: f64,
    pub note: Option<String>,
}

impl ContributionDraft {
    pub fn new(date: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            amount,
            note: None,
        }
    }

    /// Starts a draft dated on the clock's current day.
    pub fn dated_today(clock: &dyn Clock, amount: f64) -> Self {
        Self::new(clock.today().format("%Y-%m-%d").to_string(), amount)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.amount)?;
        validate_date(&self.date)?;
        validate_note(self.note.as_deref())
    }

    /// Blank notes are stored as absent.
    fn normalized_note(&self) -> Option<String> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_string)
    }
}

pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveAmount(amount))
    }
}

pub fn validate_date(date: &str) -> Result<(), ValidationError> {
    if date.trim().is_empty() {
        return Err(ValidationError::MissingDate);
    }
    parse_iso_date(date)
        .map(|_| ())
        .ok_or_else(|| ValidationError::InvalidDate(date.to_string()))
}

pub fn validate_note(note: Option<&str>) -> Result<(), ValidationError> {
    let len = note.map(|n| n.chars().count()).unwrap_or(0);
    if len > MAX_NOTE_CHARS {
        return Err(ValidationError::NoteTooLong {
            len,
            max: MAX_NOTE_CHARS,
        });
    }
    Ok(())
}

pub fn validate_target(target: f64) -> Result<f64, ValidationError> {
    if target.is_finite() && target > 0.0 {
        Ok(target)
    } else {
        Err(ValidationError::NonPositiveTarget(target))
    }
}

/// Turns validated drafts into contributions and edit patches.
pub struct ContributionService;

impl ContributionService {
    /// Validates the draft and assigns a fresh identifier.
    pub fn create(draft: ContributionDraft) -> Result<Contribution, CoreError> {
        draft.validate()?;
        Ok(Contribution {
            id: Uuid::new_v4().to_string(),
            date: draft.date.trim().to_string(),
            amount: draft.amount,
            note: draft.normalized_note(),
        })
    }

    /// Validates the draft and produces a patch that rewrites every editable field.
    pub fn patch(draft: ContributionDraft) -> Result<ContributionPatch, CoreError> {
        draft.validate()?;
        Ok(ContributionPatch {
            date: Some(draft.date.trim().to_string()),
            amount: Some(draft.amount),
            note: Some(draft.normalized_note()),
        })
    }
}
