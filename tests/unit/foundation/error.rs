use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlipError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SlipError::template("x")
            .to_string()
            .contains("template error:")
    );
    assert!(SlipError::render("x").to_string().contains("render error:"));
    assert!(SlipError::encode("x").to_string().contains("encode error:"));
    assert!(SlipError::config("x").to_string().contains("config error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlipError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
