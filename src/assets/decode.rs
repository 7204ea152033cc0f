use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{SlipError, SlipResult},
};

const MAX_TEMPLATE_DIM: u32 = u16::MAX as u32;

/// Decoded card template in premultiplied RGBA8.
#[derive(Clone)]
pub struct TemplateImage {
    canvas: Canvas,
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl std::fmt::Debug for TemplateImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateImage")
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

impl TemplateImage {
    /// Natural size of the template; cards render at this size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub(crate) fn paint(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(self.pixmap.clone()),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        }
    }

    fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: &[u8]) -> SlipResult<Self> {
        let canvas = Canvas::new(width, height).map_err(|e| SlipError::template(e.to_string()))?;
        if width > MAX_TEMPLATE_DIM || height > MAX_TEMPLATE_DIM {
            return Err(SlipError::template(format!(
                "template {width}x{height} exceeds {MAX_TEMPLATE_DIM}x{MAX_TEMPLATE_DIM}"
            )));
        }
        if rgba8_premul.len() != width as usize * height as usize * 4 {
            return Err(SlipError::template("template byte length mismatch"));
        }

        let mut may_have_opacities = false;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for px in rgba8_premul.chunks_exact(4) {
            let a = px[3];
            may_have_opacities |= a != 255;
            pixels.push(vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a,
            });
        }

        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(
            pixels,
            width as u16,
            height as u16,
            may_have_opacities,
        );
        Ok(Self {
            canvas,
            pixmap: Arc::new(pixmap),
        })
    }
}

/// Decode template bytes: any raster format `image` knows, or SVG.
pub fn decode_template(bytes: &[u8]) -> SlipResult<TemplateImage> {
    if bytes.is_empty() {
        return Err(SlipError::template("template file is empty"));
    }
    if looks_like_svg(bytes) {
        return decode_svg_template(bytes);
    }

    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SlipError::template(format!("decode template image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    TemplateImage::from_premul_rgba8(width, height, &rgba8_premul)
}

pub fn load_template(path: &Path) -> SlipResult<TemplateImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read template '{}'", path.display()))?;
    let template = decode_template(&bytes)?;
    tracing::info!(
        path = %path.display(),
        width = template.canvas.width,
        height = template.canvas.height,
        "loaded template"
    );
    Ok(template)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// Rasterize an SVG template at its intrinsic size.
fn decode_svg_template(bytes: &[u8]) -> SlipResult<TemplateImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| SlipError::template(format!("parse svg template: {e}")))?;

    let size = tree.size();
    let to_px = |v: f32| -> SlipResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(SlipError::template("svg template has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    };
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    if width > MAX_TEMPLATE_DIM || height > MAX_TEMPLATE_DIM {
        return Err(SlipError::template(format!(
            "svg template size too large: {width}x{height}"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SlipError::template("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    TemplateImage::from_premul_rgba8(width, height, pixmap.data())
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
