use chrono::NaiveDate;

use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = AppConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.export.target_width, Some(1280));
    assert_eq!(cfg.date_shift.default_offset_days, 1);
    assert_eq!(cfg.allowed_kinds.len(), 5);
}

#[test]
fn partial_config_overrides_only_named_values() {
    let cfg = AppConfig::from_json_str(
        r#"{
            "date_shift": {"week_overrides": {"2025-05-05": 3}},
            "allowed_kinds": ["Talk"],
            "export": {"quality": 0.75},
            "bundle_id": "42"
        }"#,
    )
    .unwrap();
    let monday = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    assert_eq!(cfg.date_shift.offset_for(monday), 3);
    assert_eq!(cfg.date_shift.default_offset_days, 1);
    assert_eq!(cfg.export.quality, 0.75);
    assert_eq!(cfg.export.target_width, Some(1280));
    assert_eq!(cfg.bundle_id, "42");
    assert_eq!(cfg.layout, TemplateLayout::default());
}

#[test]
fn invalid_json_is_a_config_error() {
    assert!(matches!(
        AppConfig::from_json_str("{not json"),
        Err(SlipError::Config(_))
    ));
}

#[test]
fn semantic_errors_surface_as_validation() {
    assert!(matches!(
        AppConfig::from_json_str(r#"{"date_shift": {"week_overrides": {"2025-05-06": 1}}}"#),
        Err(SlipError::Validation(_))
    ));
    assert!(matches!(
        AppConfig::from_json_str(r#"{"export": {"quality": 3.0}}"#),
        Err(SlipError::Validation(_))
    ));
    assert!(matches!(
        AppConfig::from_json_str(r#"{"allowed_kinds": []}"#),
        Err(SlipError::Validation(_))
    ));
}

#[test]
fn joiner_uses_configured_kinds() {
    let cfg = AppConfig::from_json_str(r#"{"allowed_kinds": ["Talk"]}"#).unwrap();
    let rows = vec![crate::schedule::record::RawRecord {
        date: "2025-05-05".to_string(),
        person: "Анна".to_string(),
        part_type: "Talk".to_string(),
        ..Default::default()
    }];
    assert_eq!(cfg.joiner().join(&rows).len(), 1);
    assert!(AppConfig::default().joiner().join(&rows).is_empty());
}
