mod common;

use std::sync::Arc;

use common::{draft, RecordingStorage};
use savings_tracker::{
    format::{format_currency, format_month, MONTH_LABELS},
    metrics::{
        cumulative_monthly_savings, group_by_month, monthly_target_met, monthly_totals,
        newest_first,
    },
    Action, CoreError, SavingsError, SavingsState, SavingsStore, Theme, ValidationError,
};

fn open_store() -> (SavingsStore, Arc<RecordingStorage>) {
    let storage = Arc::new(RecordingStorage::new());
    let store = SavingsStore::open(storage.clone()).expect("open store");
    (store, storage)
}

#[test]
fn yearly_scenario_reports_progress() {
    let (mut store, storage) = open_store();
    store.set_target(12000.0).expect("set target");
    for (date, amount) in [
        ("2024-01-12", 100.0),
        ("2024-02-12", 200.0),
        ("2024-03-12", 300.0),
        ("2024-04-12", 400.0),
        ("2024-05-12", 500.0),
    ] {
        store.add_contribution(draft(date, amount)).expect("add");
    }

    let progress = store.progress();
    assert_eq!(progress.total_saved, 1500.0);
    assert_eq!(progress.percent_complete, 13);
    assert_eq!(progress.remaining, 10500.0);
    assert_eq!(progress.monthly_target, 1000.0);
    assert_eq!(format_currency(progress.remaining, "USD"), "$10,500");

    let contributions = &store.state().contributions;
    let cumulative = cumulative_monthly_savings(contributions);
    assert_eq!(cumulative[4], 1500.0);
    assert_eq!(cumulative[11], 1500.0);
    assert!(monthly_target_met(contributions, store.state().target)
        .iter()
        .all(|met| !met));

    store.flush();
    assert_eq!(storage.save_calls(), 6);
    assert_eq!(storage.persisted().as_ref(), Some(store.state()));
}

#[test]
fn invalid_drafts_never_reach_state() {
    let (mut store, storage) = open_store();

    let err = store
        .add_contribution(draft("2024-01-01", 0.0))
        .expect_err("zero amount rejected");
    assert!(matches!(
        err,
        SavingsError::Core(CoreError::Validation(ValidationError::NonPositiveAmount(_)))
    ));
    assert!(store.add_contribution(draft("", 10.0)).is_err());
    assert!(store
        .add_contribution(draft("2024-01-01", 10.0).with_note("n".repeat(201)))
        .is_err());
    assert!(store.set_target(-100.0).is_err());

    assert_eq!(store.state(), &SavingsState::initial());
    store.flush();
    assert_eq!(storage.save_calls(), 0);
}

#[test]
fn edit_through_store_reports_missing_ids() {
    let (mut store, _storage) = open_store();
    let id = store
        .add_contribution(draft("2024-06-01", 40.0).with_note("Lunch money"))
        .expect("add");

    store
        .edit_contribution(&id, draft("2024-06-02", 45.0))
        .expect("edit");
    let edited = store.state().contribution(&id).expect("still present");
    assert_eq!(edited.amount, 45.0);
    assert_eq!(edited.date, "2024-06-02");
    assert_eq!(edited.note, None);

    let err = store
        .edit_contribution("missing", draft("2024-06-02", 45.0))
        .expect_err("unknown id");
    assert!(matches!(
        err,
        SavingsError::Core(CoreError::ContributionNotFound(_))
    ));

    // The raw action keeps the silent no-op contract.
    let before = store.state().clone();
    assert!(!store.dispatch(Action::delete("missing")));
    assert_eq!(store.state(), &before);
}

#[test]
fn delete_toggle_and_reset_flow() {
    let (mut store, _storage) = open_store();
    store.set_target(600.0).expect("set target");
    let keep = store.add_contribution(draft("2024-01-01", 10.0)).expect("add");
    let removed = store.add_contribution(draft("2024-01-02", 20.0)).expect("add");

    assert!(store.delete_contribution(&removed));
    assert_eq!(store.state().contributions.len(), 1);
    assert!(store.state().contains(&keep));

    assert_eq!(store.toggle_theme(), Theme::Dark);
    assert_eq!(store.toggle_theme(), Theme::Light);

    store.reset();
    assert_eq!(store.state(), &SavingsState::initial());
}

#[test]
fn history_views_keep_their_own_granularity() {
    let (mut store, _storage) = open_store();
    store.add_contribution(draft("2023-03-01", 100.0)).expect("add");
    store.add_contribution(draft("2024-03-15", 50.0)).expect("add");
    store.add_contribution(draft("2024-01-20", 30.0)).expect("add");

    let contributions = &store.state().contributions;
    let totals = monthly_totals(contributions);
    assert_eq!(totals[2], 150.0);
    assert_eq!(MONTH_LABELS[2], "Mar");

    let groups = group_by_month(contributions);
    let labels: Vec<String> = groups
        .iter()
        .map(|group| format_month(&group.month_key.to_string()))
        .collect();
    assert_eq!(labels, vec!["March 2024", "January 2024", "March 2023"]);

    let newest: Vec<String> = newest_first(contributions)
        .into_iter()
        .map(|c| c.date)
        .collect();
    assert_eq!(newest, vec!["2024-03-15", "2024-01-20", "2023-03-01"]);
}

#[test]
fn export_then_import_restores_state() {
    let (mut store, _storage) = open_store();
    store.set_target(3000.0).expect("set target");
    store
        .add_contribution(draft("2024-02-02", 75.0).with_note("Gift"))
        .expect("add");
    store.add_contribution(draft("2024-02-03", 25.0)).expect("add");
    let exported = store.export_json().expect("export");
    let expected = store.state().clone();

    store.reset();
    let warnings = store.import_json(&exported).expect("import");
    assert!(warnings.is_empty());
    assert_eq!(store.state(), &expected);

    assert!(store.import_json("[]").is_err());
    assert_eq!(store.state(), &expected);
}

#[test]
fn import_reports_invariant_violations() {
    let (mut store, _storage) = open_store();
    let document = r#"{
        "target": 100,
        "contributions": [
            {"id": "x", "date": "2024-01-01", "amount": 5},
            {"id": "x", "date": "someday", "amount": 7}
        ],
        "settings": {"theme": "dark"}
    }"#;

    let warnings = store.import_json(document).expect("import");
    assert_eq!(warnings.len(), 2);
    assert_eq!(store.state().contributions.len(), 2);
    assert_eq!(store.state().settings.theme, Theme::Dark);
    assert_eq!(monthly_totals(&store.state().contributions)[0], 5.0);
}
