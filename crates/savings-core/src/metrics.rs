//! Derived savings metrics.
//!
//! Every function here is pure and recomputes from its inputs on each call.
//! Two month granularities coexist on purpose:
//!
//! - [`monthly_totals`] and [`cumulative_monthly_savings`] fold every year into twelve
//!   calendar-month buckets for the annual trend view.
//! - [`group_by_month`] keeps concrete year-months for the chronological history.
//!
//! Contributions whose date does not parse are skipped with a warning.

use std::{cmp::Ordering, collections::BTreeMap};

use serde::Serialize;
use tracing::warn;

use savings_domain::{Contribution, MonthKey, SavingsState};

/// Number of calendar-month buckets in the annual trend series.
pub const MONTHS_PER_YEAR: usize = 12;

/// Twelve per-month values, January first.
pub type MonthlySeries = [f64; MONTHS_PER_YEAR];

/// Sum of every contribution amount. Empty input yields `0`.
pub fn total_saved(contributions: &[Contribution]) -> f64 {
    contributions.iter().fold(0.0, |sum, c| sum + c.amount)
}

/// Amount still missing to reach `target`; never negative.
pub fn remaining(target: f64, total_saved: f64) -> f64 {
    (target - total_saved).max(0.0)
}

/// Progress toward `target` as a whole percentage in `0..=100`.
///
/// A zero target reports `0` rather than dividing by zero, and over-saving is clamped
/// to `100`.
pub fn percent_complete(target: f64, total_saved: f64) -> u8 {
    if target == 0.0 {
        return 0;
    }
    let percent = (total_saved / target * 100.0).round();
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0) as u8
}

/// The annual target spread evenly over twelve months, rounded to a whole unit.
pub fn monthly_target(annual_target: f64) -> f64 {
    (annual_target / MONTHS_PER_YEAR as f64).round()
}

/// Per-calendar-month sums across all years (index 0 = January).
pub fn monthly_totals(contributions: &[Contribution]) -> MonthlySeries {
    let mut totals = [0.0; MONTHS_PER_YEAR];
    for contribution in contributions {
        match contribution.month_key() {
            Some(key) => totals[key.month_index()] += contribution.amount,
            None => warn_unparseable(contribution),
        }
    }
    totals
}

/// Whether each calendar month reached [`monthly_target`].
pub fn monthly_target_met(
    contributions: &[Contribution],
    annual_target: f64,
) -> [bool; MONTHS_PER_YEAR] {
    let target = monthly_target(annual_target);
    monthly_totals(contributions).map(|total| total >= target)
}

/// Running total of [`monthly_totals`] from January through December.
pub fn cumulative_monthly_savings(contributions: &[Contribution]) -> MonthlySeries {
    let mut running = 0.0;
    monthly_totals(contributions).map(|total| {
        running += total;
        running
    })
}

/// Contributions that fall in one concrete year-month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGroup {
    pub month_key: MonthKey,
    pub contributions: Vec<Contribution>,
    pub total: f64,
}

/// Buckets contributions by year-month, most recent month first.
///
/// Contributions keep their insertion order within a group.
pub fn group_by_month(contributions: &[Contribution]) -> Vec<MonthGroup> {
    let mut groups: BTreeMap<MonthKey, Vec<Contribution>> = BTreeMap::new();
    for contribution in contributions {
        match contribution.month_key() {
            Some(key) => groups.entry(key).or_default().push(contribution.clone()),
            None => warn_unparseable(contribution),
        }
    }
    groups
        .into_iter()
        .rev()
        .map(|(month_key, contributions)| MonthGroup {
            month_key,
            total: total_saved(&contributions),
            contributions,
        })
        .collect()
}

/// Contributions ordered for display: newest date first.
///
/// The sort is stable, so equal dates keep insertion order. Unparseable dates sort last.
pub fn newest_first(contributions: &[Contribution]) -> Vec<Contribution> {
    let mut sorted = contributions.to_vec();
    sorted.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Headline figures shown alongside the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub target: f64,
    pub total_saved: f64,
    pub remaining: f64,
    pub percent_complete: u8,
    pub monthly_target: f64,
}

impl ProgressSummary {
    pub fn new(target: f64, contributions: &[Contribution]) -> Self {
        let saved = total_saved(contributions);
        Self {
            target,
            total_saved: saved,
            remaining: remaining(target, saved),
            percent_complete: percent_complete(target, saved),
            monthly_target: monthly_target(target),
        }
    }

    pub fn from_state(state: &SavingsState) -> Self {
        Self::new(state.target, &state.contributions)
    }

    pub fn is_complete(&self) -> bool {
        self.target > 0.0 && self.remaining == 0.0
    }
}

fn warn_unparseable(contribution: &Contribution) {
    warn!(
        contribution_id = %contribution.id,
        date = %contribution.date,
        "skipping contribution with unparseable date"
    );
}
