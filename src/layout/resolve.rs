use crate::{
    foundation::core::{BezPath, Canvas, Point, round_px},
    layout::spec::{Align, CheckboxKey, DEFAULT_LINE_HEIGHT, FieldKey, TemplateLayout},
};

/// A text field in template pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedField {
    pub key: FieldKey,
    pub x: i64,
    pub y: i64,
    pub font_size: u32,
    pub align: Align,
    pub max_width: Option<u32>,
    pub wrap: bool,
    /// Vertical distance between wrapped lines.
    pub line_step: u32,
}

impl ResolvedField {
    /// Horizontal anchor the text is aligned against.
    pub fn anchor_x(&self) -> i64 {
        match (self.align, self.max_width) {
            (Align::Right, Some(w)) => self.x + i64::from(w),
            _ => self.x,
        }
    }
}

/// A checkbox in template pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedCheckbox {
    pub key: CheckboxKey,
    pub x: i64,
    pub y: i64,
    pub size: u32,
}

impl ResolvedCheckbox {
    pub fn stroke_width(&self) -> u32 {
        round_px(f64::from(self.size) / 10.0).max(2) as u32
    }

    /// Three-point check mark inside the box.
    pub fn mark_path(&self) -> BezPath {
        let s = f64::from(self.size);
        let at = |fx: f64, fy: f64| Point::new(self.x as f64 + s * fx, self.y as f64 + s * fy);

        let mut path = BezPath::new();
        path.move_to(at(0.15, 0.55));
        path.line_to(at(0.45, 0.85));
        path.line_to(at(0.9, 0.2));
        path
    }
}

/// Layout geometry for one concrete template resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedLayout {
    pub canvas: Canvas,
    pub scale_x: f64,
    pub scale_y: f64,
    pub fields: Vec<ResolvedField>,
    pub checkboxes: Vec<ResolvedCheckbox>,
}

impl ResolvedLayout {
    pub fn checkbox(&self, key: CheckboxKey) -> Option<&ResolvedCheckbox> {
        self.checkboxes.iter().find(|c| c.key == key)
    }
}

impl TemplateLayout {
    /// Scale the base-canvas layout to a template of `actual` pixels.
    ///
    /// Positions scale per axis; font and mark sizes use the mean of both scales. Max widths
    /// follow the horizontal scale.
    pub fn resolve(&self, actual: Canvas) -> ResolvedLayout {
        let scale_x = f64::from(actual.width) / f64::from(self.base.width);
        let scale_y = f64::from(actual.height) / f64::from(self.base.height);
        let size_scale = (scale_x + scale_y) / 2.0;

        let fields = self
            .fields
            .iter()
            .map(|f| {
                let font_size = round_px(f.size * size_scale).max(1) as u32;
                let line_height = f.line_height.unwrap_or(DEFAULT_LINE_HEIGHT);
                ResolvedField {
                    key: f.key,
                    x: round_px(f.x * scale_x),
                    y: round_px(f.y * scale_y),
                    font_size,
                    align: f.align,
                    max_width: f.max_width.map(|w| round_px(w * scale_x).max(1) as u32),
                    wrap: f.wrap,
                    line_step: round_px(f64::from(font_size) * line_height).max(1) as u32,
                }
            })
            .collect();

        let checkboxes = self
            .checkboxes
            .iter()
            .map(|c| ResolvedCheckbox {
                key: c.key,
                x: round_px(c.x * scale_x),
                y: round_px(c.y * scale_y),
                size: round_px(c.size * size_scale).max(1) as u32,
            })
            .collect();

        ResolvedLayout {
            canvas: actual,
            scale_x,
            scale_y,
            fields,
            checkboxes,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolve.rs"]
mod tests;
