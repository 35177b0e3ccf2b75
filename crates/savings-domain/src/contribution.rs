//! Domain models for savings contributions and partial edits.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::common::*;

/// One recorded deposit toward the annual savings target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    /// ISO 8601 calendar date, kept verbatim so malformed persisted values survive a load.
    pub date: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Contribution {
    pub fn new(id: impl Into<String>, date: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Returns the calendar day this contribution was made, if the stored date parses.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }

    pub fn month_key(&self) -> Option<MonthKey> {
        self.parsed_date().map(MonthKey::from_date)
    }

    /// Merges `patch` over this contribution, leaving unspecified fields intact.
    pub fn apply_patch(&mut self, patch: &ContributionPatch) {
        if let Some(date) = &patch.date {
            self.date = date.clone();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(note) = &patch.note {
            self.note = note.clone();
        }
    }
}

impl Identifiable for Contribution {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Contribution {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Contribution {
    fn display_label(&self) -> String {
        match &self.note {
            Some(note) => format!("{} {:.2} ({})", self.date, self.amount, note),
            None => format!("{} {:.2}", self.date, self.amount),
        }
    }
}

/// Partial update for an existing contribution. `None` leaves a field untouched.
///
/// The identifier is deliberately absent: edits never re-key a contribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// `Some(None)` clears the note; `None` keeps it.
    #[serde(
        default,
        deserialize_with = "deserialize_note_update",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<Option<String>>,
}

impl ContributionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(Some(note.into()));
        self
    }

    pub fn clear_note(mut self) -> Self {
        self.note = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.amount.is_none() && self.note.is_none()
    }
}

fn deserialize_note_update<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_is_omitted_when_absent() {
        let contribution = Contribution::new("c-1", "2024-01-15", 500.0);
        let json = serde_json::to_value(&contribution).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "c-1", "date": "2024-01-15", "amount": 500.0})
        );
    }

    #[test]
    fn patch_only_touches_named_fields() {
        let mut contribution = Contribution::new("c-1", "2024-01-15", 500.0).with_note("Original");
        contribution.apply_patch(&ContributionPatch::new().amount(600.0));

        assert_eq!(contribution.amount, 600.0);
        assert_eq!(contribution.date, "2024-01-15");
        assert_eq!(contribution.note.as_deref(), Some("Original"));
    }

    #[test]
    fn patch_can_clear_note() {
        let mut contribution = Contribution::new("c-1", "2024-01-15", 500.0).with_note("Original");
        contribution.apply_patch(&ContributionPatch::new().clear_note());
        assert_eq!(contribution.note, None);
    }

    #[test]
    fn patch_distinguishes_null_note_from_missing_note() {
        let cleared: ContributionPatch = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(cleared.note, Some(None));

        let untouched: ContributionPatch = serde_json::from_str(r#"{"amount": 10.0}"#).unwrap();
        assert_eq!(untouched.note, None);
        assert_eq!(untouched.amount, Some(10.0));
    }

    #[test]
    fn month_key_follows_parsed_date() {
        let contribution = Contribution::new("c-1", "2023-03-01", 100.0);
        assert_eq!(contribution.month_key(), Some(MonthKey::new(2023, 3)));

        let broken = Contribution::new("c-2", "03/01/2023", 100.0);
        assert_eq!(broken.month_key(), None);
    }
}
