use super::*;

#[test]
fn reads_header_based_rows_and_trims() {
    let csv_data = "Date,Person,PartType,Assignment,School\n\
                    2025-05-05, Анна Петрова ,Apply1,Начало разговора,1\n\
                    \n\
                    2025-05-05,Мария,Apply1Assistant,,0\n";
    let rows = read_records(csv_data.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].person, "Анна Петрова");
    assert_eq!(rows[0].assignment, "Начало разговора");
    assert!(rows[0].school_flag());
    assert_eq!(rows[1].part_type, "Apply1Assistant");
    assert!(!rows[1].school_flag());
}

#[test]
fn drops_rows_without_date_or_person() {
    let csv_data = "Date,Person,PartType\n\
                    ,Anna,Apply1\n\
                    2025-05-05,,Apply1\n\
                    2025-05-05,Boris,Apply2\n";
    let rows = read_records(csv_data.as_bytes()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].person, "Boris");
}

#[test]
fn missing_and_extra_columns_are_tolerated() {
    let csv_data = "Person,Date,Notes\nBoris,05.05.2025,whatever\n";
    let rows = read_records(csv_data.as_bytes()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "05.05.2025");
    assert_eq!(rows[0].part_type, "");
    assert_eq!(rows[0].school, "");
}

#[test]
fn school_flag_only_accepts_literal_one() {
    let mut row = RawRecord {
        school: " 1 ".to_string(),
        ..RawRecord::default()
    };
    assert!(row.school_flag());
    row.school = "true".to_string();
    assert!(!row.school_flag());
}

#[test]
fn joined_entry_exposes_parsed_date() {
    let entry = JoinedEntry {
        date: "2025-05-06".to_string(),
        ..JoinedEntry::default()
    };
    assert_eq!(
        entry.parsed_date(),
        chrono::NaiveDate::from_ymd_opt(2025, 5, 6)
    );
    assert_eq!(JoinedEntry::default().parsed_date(), None);
}
