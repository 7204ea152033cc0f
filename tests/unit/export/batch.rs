use super::*;

#[test]
fn sanitize_keeps_latin_and_cyrillic_letters() {
    assert_eq!(sanitize_name("Анна Петрова"), "Анна_Петрова");
    assert_eq!(sanitize_name("  Ёлкин-Ёжиков  "), "Ёлкин-Ёжиков");
    assert_eq!(sanitize_name("O'Brien, John (2)"), "OBrien_John");
    assert_eq!(sanitize_name("snake_case   name"), "snake_case_name");
    assert_eq!(sanitize_name("Zoë"), "Zo");
    assert_eq!(sanitize_name("123"), "");
}

#[test]
fn artifact_name_combines_date_and_person() {
    let entry = JoinedEntry {
        date: "2025-05-06".to_string(),
        person: "Анна  Петрова!".to_string(),
        ..JoinedEntry::default()
    };
    assert_eq!(artifact_name(&entry), "2025-05-06_Анна_Петрова.jpg");
}

#[test]
fn settings_validation() {
    ExportSettings::default().validate().unwrap();
    let bad_q = ExportSettings {
        quality: 0.0,
        ..ExportSettings::default()
    };
    assert!(bad_q.validate().is_err());
    let bad_w = ExportSettings {
        target_width: Some(0),
        ..ExportSettings::default()
    };
    assert!(bad_w.validate().is_err());
    let no_limit = ExportSettings {
        target_width: None,
        quality: 1.0,
    };
    no_limit.validate().unwrap();
}

#[test]
fn write_artifacts_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("cards");
    let mut artifacts = Artifacts::new();
    artifacts.insert("a.jpg".to_string(), vec![1, 2, 3]);
    write_artifacts(&out, &artifacts).unwrap();
    assert_eq!(std::fs::read(out.join("a.jpg")).unwrap(), vec![1, 2, 3]);
}
