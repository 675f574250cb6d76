#![forbid(unsafe_code)]
use chrono::NaiveDate;
use shift_csv::{
    Key, KeyOutcome, ScheduleEntry, SelectError, SelectionController, SelectionState,
    ShiftCatalog, ShiftTypeDefinition,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn catalog() -> ShiftCatalog {
    ShiftCatalog::new(vec![
        ShiftTypeDefinition::new("Morning", "08:00", "14:00", false),
        ShiftTypeDefinition::new("Evening", "14:00", "20:00", false),
        ShiftTypeDefinition::new("Off", "00:00", "23:59", true),
    ])
    .unwrap()
}

#[test]
fn creating_advances_to_next_day() {
    let mut c = SelectionController::new(catalog());
    c.select_empty_day(day(1));
    assert_eq!(c.state(), SelectionState::Creating { date: day(1) });

    c.choose_shift_type("Morning").unwrap();
    c.choose_shift_type("Evening").unwrap();

    assert_eq!(c.state(), SelectionState::Creating { date: day(3) });
    let all: Vec<_> = c.store().all().collect();
    assert_eq!(
        all,
        vec![
            ScheduleEntry::new(day(1), "Morning"),
            ScheduleEntry::new(day(2), "Evening"),
        ]
    );
}

#[test]
fn creating_crosses_month_end() {
    let mut c = SelectionController::new(catalog());
    let last = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    c.select_empty_day(last);
    c.choose_shift_type("Off").unwrap();
    assert_eq!(c.active_date(), Some(day(1)));
}

#[test]
fn editing_overwrites_and_returns_to_idle() {
    let mut c = SelectionController::new(catalog());
    c.select_empty_day(day(4));
    c.choose_shift_type("Morning").unwrap();

    c.select_day_with_entry(day(4));
    assert_eq!(c.state(), SelectionState::Editing { date: day(4), index: 0 });

    c.choose_shift_type("Off").unwrap();
    assert_eq!(c.state(), SelectionState::Idle);
    assert_eq!(c.store().get(day(4)), Some("Off"));
    assert_eq!(c.store().len(), 1);
}

#[test]
fn selecting_entry_on_empty_day_creates() {
    let mut c = SelectionController::new(catalog());
    c.select_day_with_entry(day(9));
    assert_eq!(c.state(), SelectionState::Creating { date: day(9) });
}

#[test]
fn cancel_after_edit_selection_leaves_store_untouched() {
    let mut c = SelectionController::new(catalog());
    c.select_empty_day(day(1));
    c.choose_shift_type("Morning").unwrap();
    let before = c.store().clone();

    c.select_day_with_entry(day(1));
    c.cancel();

    assert_eq!(c.state(), SelectionState::Idle);
    assert_eq!(c.store(), &before);
}

#[test]
fn unknown_type_is_rejected_without_mutation() {
    let mut c = SelectionController::new(catalog());
    c.select_empty_day(day(1));
    let err = c.choose_shift_type("Night").unwrap_err();
    assert_eq!(err, SelectError::UnknownShiftType("Night".into()));
    assert!(c.store().is_empty());
    assert_eq!(c.state(), SelectionState::Creating { date: day(1) });
}

#[test]
fn choose_while_idle_is_rejected() {
    let mut c = SelectionController::new(catalog());
    assert_eq!(c.choose_shift_type("Morning"), Err(SelectError::NotSelecting));
    assert!(c.store().is_empty());
}

#[test]
fn digit_shortcut_selects_by_position() {
    let mut c = SelectionController::new(catalog());
    c.select_empty_day(day(1));

    let outcome = c.handle_key(Key::Digit(2));
    assert_eq!(outcome, KeyOutcome::Assigned(ScheduleEntry::new(day(1), "Evening")));
    assert_eq!(c.state(), SelectionState::Creating { date: day(2) });
}

#[test]
fn out_of_range_digit_is_ignored() {
    let mut c = SelectionController::new(catalog());
    c.select_empty_day(day(1));
    let state = c.state();

    assert_eq!(c.handle_key(Key::Digit(9)), KeyOutcome::Ignored);
    assert_eq!(c.handle_key(Key::Digit(0)), KeyOutcome::Ignored);
    assert_eq!(c.state(), state);
    assert!(c.store().is_empty());
}

#[test]
fn digits_are_ignored_when_idle() {
    let mut c = SelectionController::new(catalog());
    assert_eq!(c.handle_key(Key::Digit(1)), KeyOutcome::Ignored);
    assert!(c.store().is_empty());
}

#[test]
fn enter_requests_export_in_any_state() {
    let mut c = SelectionController::new(catalog());
    assert_eq!(c.handle_key(Key::Enter), KeyOutcome::ExportRequested);
    c.select_empty_day(day(1));
    assert_eq!(c.handle_key(Key::from_char('\n')), KeyOutcome::ExportRequested);
    assert_eq!(c.state(), SelectionState::Creating { date: day(1) });
}

#[test]
fn delete_removes_active_day_only() {
    let mut c = SelectionController::new(catalog());
    c.select_empty_day(day(1));
    c.choose_shift_type("Morning").unwrap();
    c.choose_shift_type("Evening").unwrap();

    c.select_day_with_entry(day(1));
    let removed = c.delete_active_day();

    assert_eq!(removed, Some(ScheduleEntry::new(day(1), "Morning")));
    assert_eq!(c.state(), SelectionState::Idle);
    assert_eq!(c.store().get(day(1)), None);
    assert_eq!(c.store().get(day(2)), Some("Evening"));
}

#[test]
fn delete_without_entry_is_noop() {
    let mut c = SelectionController::new(catalog());
    assert_eq!(c.delete_active_day(), None);

    c.select_empty_day(day(5));
    assert_eq!(c.delete_active_day(), None);
    assert_eq!(c.state(), SelectionState::Idle);
}

#[test]
fn reset_empties_store_from_any_state() {
    let mut c = SelectionController::new(catalog());
    c.select_empty_day(day(1));
    c.handle_key(Key::Digit(1));
    c.handle_key(Key::Digit(3));
    c.select_day_with_entry(day(2));

    c.reset();
    assert!(c.store().is_empty());
    assert_eq!(c.state(), SelectionState::Idle);
}

#[test]
fn load_entries_replaces_store_and_last_duplicate_wins() {
    let mut c = SelectionController::new(catalog());
    c.select_empty_day(day(20));
    c.choose_shift_type("Morning").unwrap();

    c.load_entries(vec![
        ScheduleEntry::new(day(1), "Morning"),
        ScheduleEntry::new(day(1), "Off"),
        ScheduleEntry::new(day(2), "Mystery"),
    ]);

    assert_eq!(c.state(), SelectionState::Idle);
    assert_eq!(c.store().len(), 2);
    assert_eq!(c.store().get(day(1)), Some("Off"));
    assert_eq!(c.store().get(day(20)), None);
}
