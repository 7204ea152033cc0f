use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_natural_size_and_premultiplies() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let template = decode_template(&png_bytes(img)).unwrap();
    assert_eq!(template.canvas(), Canvas::new(1, 1).unwrap());
    assert_eq!(
        template.pixmap.data_as_u8_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_jpeg_template() {
    let img = image::RgbImage::from_pixel(31, 17, image::Rgb([200, 200, 200]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();
    let template = decode_template(&buf).unwrap();
    assert_eq!(template.canvas(), Canvas::new(31, 17).unwrap());
}

#[test]
fn empty_or_corrupt_bytes_are_template_errors() {
    assert!(matches!(decode_template(&[]), Err(SlipError::Template(_))));
    assert!(matches!(
        decode_template(b"definitely not an image"),
        Err(SlipError::Template(_))
    ));
    assert!(matches!(
        decode_template(br#"<svg"#),
        Err(SlipError::Template(_))
    ));
}

#[test]
fn svg_template_rasterizes_at_intrinsic_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="124" height="175">
        <rect width="124" height="175" fill="#ffffff"/>
    </svg>"##;
    let template = decode_template(svg).unwrap();
    assert_eq!(template.canvas(), Canvas::new(124, 175).unwrap());
    assert!(
        template
            .pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .all(|px| px == [255, 255, 255, 255])
    );
}

#[test]
fn load_template_reports_missing_file() {
    let err = load_template(Path::new("/nonexistent/template.png")).unwrap_err();
    assert!(err.to_string().contains("read template"));
}
