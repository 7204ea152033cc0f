use std::collections::BTreeSet;

use crate::foundation::{
    core::{Canvas, Rgba8},
    error::{SlipError, SlipResult},
};

/// Line height multiplier used when a wrapped field does not set one.
pub const DEFAULT_LINE_HEIGHT: f64 = 1.15;

/// Canvas size every layout coordinate is authored against.
pub const BASE_CANVAS: Canvas = Canvas {
    width: 1240,
    height: 1754,
};

/// Entry value a text field shows.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FieldKey {
    Person,
    Assistant,
    Date,
    Assignment,
}

/// Entry flag a checkbox shows.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum CheckboxKey {
    SchoolMain,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// One text field in base-canvas units.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub max_width: Option<f64>,
    #[serde(default)]
    pub wrap: bool,
    #[serde(default)]
    pub line_height: Option<f64>,
}

/// One checkbox in base-canvas units; `(x, y)` is its top-left corner.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CheckboxSpec {
    pub key: CheckboxKey,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Fixed placement of every templated value on the card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TemplateLayout {
    pub base: Canvas,
    pub fields: Vec<FieldSpec>,
    pub checkboxes: Vec<CheckboxSpec>,
    pub text_color: Rgba8,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        let field = |key, x, y, max_width| FieldSpec {
            key,
            x,
            y,
            size: 56.0,
            align: Align::Left,
            max_width: Some(max_width),
            wrap: false,
            line_height: None,
        };

        Self {
            base: BASE_CANVAS,
            fields: vec![
                field(FieldKey::Person, 230.0, 325.0, 900.0),
                field(FieldKey::Assistant, 405.0, 455.0, 900.0),
                field(FieldKey::Date, 260.0, 580.0, 520.0),
                FieldSpec {
                    wrap: true,
                    line_height: Some(1.2),
                    ..field(FieldKey::Assignment, 445.0, 705.0, 750.0)
                },
            ],
            checkboxes: vec![CheckboxSpec {
                key: CheckboxKey::SchoolMain,
                x: 130.0,
                y: 975.0,
                size: 50.0,
            }],
            text_color: Rgba8::BLACK,
        }
    }
}

impl TemplateLayout {
    pub fn validate(&self) -> SlipResult<()> {
        self.base.validate()?;

        let mut seen = BTreeSet::new();
        for f in &self.fields {
            if !seen.insert(f.key) {
                return Err(SlipError::validation(format!(
                    "field {:?} is declared more than once",
                    f.key
                )));
            }
            check_coord(f.x, f.y, || format!("field {:?}", f.key))?;
            check_positive(f.size, || format!("field {:?} size", f.key))?;
            if let Some(w) = f.max_width {
                check_positive(w, || format!("field {:?} max_width", f.key))?;
            }
            if let Some(lh) = f.line_height {
                check_positive(lh, || format!("field {:?} line_height", f.key))?;
            }
            if f.wrap && f.max_width.is_none() {
                return Err(SlipError::validation(format!(
                    "field {:?} wraps but has no max_width",
                    f.key
                )));
            }
        }

        for c in &self.checkboxes {
            check_coord(c.x, c.y, || format!("checkbox {:?}", c.key))?;
            check_positive(c.size, || format!("checkbox {:?} size", c.key))?;
        }
        Ok(())
    }
}

fn check_coord(x: f64, y: f64, what: impl Fn() -> String) -> SlipResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(SlipError::validation(format!(
            "{} position must be finite",
            what()
        )));
    }
    Ok(())
}

fn check_positive(v: f64, what: impl Fn() -> String) -> SlipResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(SlipError::validation(format!(
            "{} must be finite and > 0",
            what()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spec.rs"]
mod tests;
