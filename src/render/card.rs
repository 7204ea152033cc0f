use vello_cpu::kurbo::{Affine, Cap, Join, Rect, Stroke};

use crate::{
    assets::{decode::TemplateImage, fonts::FontFace},
    foundation::{
        core::{BezPath, Rgba8},
        error::{SlipError, SlipResult},
    },
    layout::{
        resolve::{ResolvedCheckbox, ResolvedField, ResolvedLayout},
        spec::{Align, CheckboxKey, FieldKey},
    },
    render::text::{TextEngine, wrap_words},
    schedule::record::JoinedEntry,
};

/// A rendered card in row-major RGBA8.
#[derive(Clone, Debug)]
pub struct CardFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Value an entry contributes to a text field.
///
/// The date field prefers the human-readable display string when there is one.
pub fn field_value(entry: &JoinedEntry, key: FieldKey) -> &str {
    match key {
        FieldKey::Person => &entry.person,
        FieldKey::Assistant => &entry.assistant,
        FieldKey::Date if !entry.date_display.is_empty() => &entry.date_display,
        FieldKey::Date => &entry.date,
        FieldKey::Assignment => &entry.assignment,
    }
}

fn checkbox_value(entry: &JoinedEntry, key: CheckboxKey) -> bool {
    match key {
        CheckboxKey::SchoolMain => entry.school,
    }
}

/// Draws entries onto the template.
///
/// One renderer owns one text engine; cards are drawn one at a time.
pub struct CardRenderer {
    text: TextEngine,
    color: Rgba8,
}

impl CardRenderer {
    pub fn new(font: &FontFace, color: Rgba8) -> SlipResult<Self> {
        Ok(Self {
            text: TextEngine::new(font)?,
            color,
        })
    }

    /// Render one entry at the template's natural resolution.
    pub fn render(
        &mut self,
        entry: &JoinedEntry,
        template: &TemplateImage,
        layout: &ResolvedLayout,
    ) -> SlipResult<CardFrame> {
        let canvas = template.canvas();
        if layout.canvas != canvas {
            return Err(SlipError::render(format!(
                "layout resolved for {}x{} but template is {}x{}",
                layout.canvas.width, layout.canvas.height, canvas.width, canvas.height
            )));
        }
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SlipError::render("template width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SlipError::render("template height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(Affine::IDENTITY);
        ctx.set_transform(Affine::IDENTITY);
        ctx.set_paint(template.paint());
        ctx.fill_rect(&Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));

        for field in &layout.fields {
            self.draw_field(&mut ctx, field_value(entry, field.key), field);
        }

        for cb in &layout.checkboxes {
            if checkbox_value(entry, cb.key) {
                self.draw_check(&mut ctx, cb);
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(CardFrame {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_field(&mut self, ctx: &mut vello_cpu::RenderContext, value: &str, field: &ResolvedField) {
        let size = field.font_size as f32;
        let max_width = field.max_width.map(f64::from);
        let x = field.anchor_x() as f64;
        let mut y = field.y as f64;

        match (field.wrap, field.max_width) {
            (true, Some(max_w)) => {
                let text = &mut self.text;
                let lines = wrap_words(value, max_w as f32, |s| text.measure(s, size));
                for line in &lines {
                    self.draw_line(ctx, line, x, y, size, field.align, max_width);
                    y += f64::from(field.line_step);
                }
            }
            _ => self.draw_line(ctx, value, x, y, size, field.align, max_width),
        }
    }

    /// Draw one line with its top edge at `y`, condensing it horizontally if it is wider than
    /// `max_width`.
    #[allow(clippy::too_many_arguments)]
    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        anchor_x: f64,
        y: f64,
        size: f32,
        align: Align,
        max_width: Option<f64>,
    ) {
        if text.trim().is_empty() {
            return;
        }

        let layout = self.text.layout_line(text, size, self.color);
        let width = f64::from(layout.width());
        let condense = match max_width {
            Some(m) if width > m && width > 0.0 => m / width,
            _ => 1.0,
        };
        let drawn = width * condense;
        let left = match align {
            Align::Left => anchor_x,
            Align::Center => anchor_x - drawn / 2.0,
            Align::Right => anchor_x - drawn,
        };

        ctx.set_transform(Affine::translate((left, y)) * Affine::scale_non_uniform(condense, 1.0));

        let font = self.text.font_data().clone();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(Affine::IDENTITY);
    }

    fn draw_check(&self, ctx: &mut vello_cpu::RenderContext, cb: &ResolvedCheckbox) {
        let stroke = Stroke::new(f64::from(cb.stroke_width()))
            .with_join(Join::Miter)
            .with_caps(Cap::Butt);
        ctx.set_transform(Affine::IDENTITY);
        ctx.set_stroke(stroke);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            self.color.r,
            self.color.g,
            self.color.b,
            self.color.a,
        ));
        ctx.stroke_path(&bezpath_to_cpu(&cb.mark_path()));
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/card.rs"]
mod tests;
