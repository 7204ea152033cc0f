use super::*;

#[test]
fn builtin_layout_is_valid_and_authored_for_base_canvas() {
    let layout = TemplateLayout::default();
    layout.validate().unwrap();
    assert_eq!(layout.base, BASE_CANVAS);
    assert_eq!(layout.fields.len(), 4);
    assert_eq!(layout.checkboxes.len(), 1);

    let assignment = layout
        .fields
        .iter()
        .find(|f| f.key == FieldKey::Assignment)
        .unwrap();
    assert!(assignment.wrap);
    assert_eq!(assignment.line_height, Some(1.2));
    assert_eq!(assignment.max_width, Some(750.0));
}

#[test]
fn duplicate_field_keys_are_rejected() {
    let mut layout = TemplateLayout::default();
    let dup = layout.fields[0].clone();
    layout.fields.push(dup);
    assert!(
        layout
            .validate()
            .unwrap_err()
            .to_string()
            .contains("more than once")
    );
}

#[test]
fn wrap_requires_max_width() {
    let mut layout = TemplateLayout::default();
    layout.fields[0].wrap = true;
    layout.fields[0].max_width = None;
    assert!(layout.validate().is_err());
}

#[test]
fn non_positive_sizes_are_rejected() {
    let mut layout = TemplateLayout::default();
    layout.checkboxes[0].size = 0.0;
    assert!(layout.validate().is_err());

    let mut layout = TemplateLayout::default();
    layout.fields[1].line_height = Some(f64::NAN);
    assert!(layout.validate().is_err());
}

#[test]
fn layout_deserializes_with_defaults() {
    let layout: TemplateLayout = serde_json::from_str(
        r#"{
            "base": {"width": 620, "height": 877},
            "fields": [{"key": "Person", "x": 10, "y": 20, "size": 28, "align": "right", "max_width": 300}]
        }"#,
    )
    .unwrap();
    layout.validate().unwrap();
    assert_eq!(layout.fields[0].align, Align::Right);
    assert!(!layout.fields[0].wrap);
    assert!(layout.checkboxes[0].key == CheckboxKey::SchoolMain);
    assert_eq!(layout.text_color, Rgba8::BLACK);
}
