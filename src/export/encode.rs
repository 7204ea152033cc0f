use std::io::Cursor;

use image::{ImageEncoder, imageops::FilterType};

use crate::{
    foundation::{
        core::round_px,
        error::{SlipError, SlipResult},
    },
    render::card::CardFrame,
};

/// Flatten a card to RGB. Transparent areas come out black, like a canvas JPEG export.
pub fn to_rgb8(frame: &CardFrame) -> SlipResult<image::RgbImage> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(SlipError::encode(format!(
            "frame byte length {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let rgb: Vec<u8> = frame
        .data
        .chunks_exact(4)
        .flat_map(|px| {
            if frame.premultiplied {
                [px[0], px[1], px[2]]
            } else {
                let a = u16::from(px[3]);
                let premul = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
                [premul(px[0]), premul(px[1]), premul(px[2])]
            }
        })
        .collect();

    image::RgbImage::from_raw(frame.width, frame.height, rgb)
        .ok_or_else(|| SlipError::encode("rgb buffer size mismatch"))
}

/// Scale down to `target_width` keeping the aspect ratio. Never scales up.
pub fn downsample(img: image::RgbImage, target_width: Option<u32>) -> image::RgbImage {
    let (w, h) = img.dimensions();
    match target_width {
        Some(tw) if tw > 0 && tw < w => {
            let th = round_px(f64::from(h) * f64::from(tw) / f64::from(w)).max(1) as u32;
            image::imageops::resize(&img, tw, th, FilterType::Triangle)
        }
        _ => img,
    }
}

/// Map a 0..1 quality factor onto the JPEG encoder's 1..=100 scale.
pub fn jpeg_quality(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 90;
    }
    round_px(f64::from(quality) * 100.0).clamp(1, 100) as u8
}

pub fn encode_jpeg(img: &image::RgbImage, quality: f32) -> SlipResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, jpeg_quality(quality))
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| SlipError::encode(format!("jpeg encode: {e}")))?;
    Ok(buf)
}

/// Lossless PNG of a card, used for previews.
pub fn encode_png(frame: &CardFrame) -> SlipResult<Vec<u8>> {
    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| SlipError::encode("rgba buffer size mismatch"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| SlipError::encode(format!("png encode: {e}")))?;
    Ok(buf)
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/encode.rs"]
mod tests;
