use chrono::NaiveDate;

use super::*;

fn row(date: &str, person: &str, part_type: &str) -> RawRecord {
    RawRecord {
        date: date.to_string(),
        person: person.to_string(),
        part_type: part_type.to_string(),
        assignment: format!("{part_type} task"),
        school: "0".to_string(),
    }
}

#[test]
fn base_kind_strips_first_assistant_marker_case_insensitively() {
    assert_eq!(base_kind("Apply1Assistant"), "Apply1");
    assert_eq!(base_kind("apply2 ASSISTANT"), "apply2");
    assert_eq!(base_kind("  BibleReading "), "BibleReading");
    assert_eq!(base_kind("AssistantAssistant"), "Assistant");
    assert!(is_assistant("Apply3assistant"));
    assert!(!is_assistant("Apply3"));
}

#[test]
fn main_and_assistant_merge_into_one_entry() {
    let rows = vec![
        row("2025-05-05", "Анна", "Apply1"),
        row("2025-05-05", "Мария", "Apply1Assistant"),
    ];
    let entries = RecordJoiner::default().join(&rows);
    assert_eq!(entries.len(), 1);
    let e = &entries[0];
    assert_eq!(e.person, "Анна");
    assert_eq!(e.assistant, "Мария");
    assert_eq!(e.assignment, "Apply1 task");
    assert_eq!(e.date, "2025-05-06");
    assert_eq!(e.date_display, "6 мая");
}

#[test]
fn main_without_assistant_has_empty_assistant() {
    let rows = vec![
        row("2025-05-05", "Анна", "Apply1"),
        row("2025-05-05", "Мария", "Apply2Assistant"),
    ];
    let entries = RecordJoiner::default().join(&rows);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].assistant, "");
}

#[test]
fn assistant_without_main_produces_nothing() {
    let rows = vec![row("2025-05-05", "Мария", "Apply1Assistant")];
    assert!(RecordJoiner::default().join(&rows).is_empty());
}

#[test]
fn unrecognized_kinds_are_dropped() {
    let rows = vec![
        row("2025-05-05", "Анна", "Talk"),
        row("2025-05-05", "Борис", "talkAssistant"),
        row("2025-05-05", "Вера", "apply1"),
        row("2025-05-05", "Глеб", "BibleReading"),
    ];
    let entries = RecordJoiner::default().join(&rows);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].person, "Глеб");
}

#[test]
fn later_duplicate_main_row_wins_but_keeps_first_position() {
    let rows = vec![
        row("2025-05-05", "Анна", "Apply1"),
        row("2025-05-05", "Борис", "Apply2"),
        row("2025-05-05", "Вера", "Apply1"),
    ];
    let entries = RecordJoiner::default().join(&rows);
    let people: Vec<&str> = entries.iter().map(|e| e.person.as_str()).collect();
    assert_eq!(people, ["Вера", "Борис"]);
}

#[test]
fn join_key_uses_raw_date_string() {
    let rows = vec![
        row("2025-05-05", "Анна", "Apply1"),
        row("05.05.2025", "Мария", "Apply1Assistant"),
    ];
    let entries = RecordJoiner::default().join(&rows);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].assistant, "");
}

#[test]
fn unparseable_date_is_kept_with_blank_date_fields() {
    let rows = vec![row("someday", "Анна", "Apply1")];
    let entries = RecordJoiner::default().join(&rows);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, "");
    assert_eq!(entries[0].date_display, "");
    assert_eq!(entries[0].person, "Анна");
}

#[test]
fn week_override_applies_to_joined_dates() {
    let monday = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    let shift = DateShift::default().with_override(monday, 2).unwrap();
    let joiner = RecordJoiner::new(DEFAULT_ALLOWED_KINDS, shift);
    let entries = joiner.join(&[row("2025-05-05", "Анна", "Apply4")]);
    assert_eq!(entries[0].date, "2025-05-07");
}

#[test]
fn school_flag_comes_from_main_row() {
    let mut main = row("2025-05-05", "Анна", "Apply1");
    main.school = "1".to_string();
    let entries = RecordJoiner::default().join(&[main, row("", "Ghost", "Apply2")]);
    assert_eq!(entries.len(), 1);
    assert!(entries[0].school);
}

#[test]
fn shift_past_the_calendar_end_blanks_the_date_instead_of_panicking() {
    let rows = vec![
        row("+262142-12-31", "Анна", "Apply1"),
        row("2025-05-05", "Борис", "Apply2"),
    ];
    let entries = RecordJoiner::default().join(&rows);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].person, "Анна");
    assert_eq!(entries[0].date, "");
    assert_eq!(entries[0].date_display, "");
    assert_eq!(entries[1].date, "2025-05-06");

    let kept = crate::schedule::filter::DateRange::unbounded().apply(&entries);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].person, "Борис");
}

#[test]
fn unvalidated_huge_offset_does_not_panic() {
    let joiner = RecordJoiner::new(DEFAULT_ALLOWED_KINDS, DateShift::new(i64::MAX));
    let entries = joiner.join(&[row("2025-05-05", "Анна", "Apply1")]);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, "");

    let joiner = RecordJoiner::new(DEFAULT_ALLOWED_KINDS, DateShift::new(-1_000_000_000));
    let entries = joiner.join(&[row("2025-05-05", "Анна", "Apply1")]);
    assert_eq!(entries[0].date, "");
}
