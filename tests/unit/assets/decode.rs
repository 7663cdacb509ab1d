use std::io::Cursor;

use super::*;

fn encode_png(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = encode_png(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let bitmap = decode_image(&buf).unwrap();
    assert_eq!(bitmap.width, 1);
    assert_eq!(bitmap.height, 1);
    assert_eq!(
        bitmap.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_svg_rasterizes_at_intrinsic_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
        <rect width="4" height="2" fill="#ff0000"/></svg>"##;
    let bitmap = decode_svg(svg).unwrap();
    assert_eq!((bitmap.width, bitmap.height), (4, 2));
    assert_eq!(bitmap.pixel(1, 1), Some([255, 0, 0, 255]));

    assert!(parse_svg(br#"<svg"#).is_err());
}

#[test]
fn sniff_mime_recognises_png_svg_and_text() {
    let png = encode_png(1, 1, vec![0, 0, 0, 255]);
    assert_eq!(sniff_mime(&png), Some("image/png"));

    let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg"/>"#;
    assert_eq!(sniff_mime(svg), Some(SVG_MIME));

    assert_eq!(sniff_mime(b"hello world"), None);
}

#[test]
fn svg_with_xml_prolog_and_doctype_decodes() {
    let svg = br##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<!-- exported by a drawing tool -->
<svg xmlns="http://www.w3.org/2000/svg" width="6" height="3">
  <rect width="6" height="3" fill="#00ff00"/>
</svg>"##;
    assert_eq!(sniff_mime(svg), Some(SVG_MIME));

    let bitmap = decode_asset(svg).unwrap();
    assert_eq!((bitmap.width, bitmap.height), (6, 3));
    assert_eq!(bitmap.pixel(2, 1), Some([0, 255, 0, 255]));
}

#[test]
fn plain_xml_is_still_not_an_image() {
    let xml = br#"<?xml version="1.0"?><feed><title>news</title></feed>"#;
    assert_ne!(sniff_mime(xml), Some(SVG_MIME));
    assert!(decode_asset(xml).unwrap_err().is_asset_load());
}

#[test]
fn decode_asset_dispatches_and_rejects_non_images() {
    let png = encode_png(2, 3, vec![9u8; 2 * 3 * 4]);
    let bitmap = decode_asset(&png).unwrap();
    assert_eq!((bitmap.width, bitmap.height), (2, 3));

    let err = decode_asset(b"not an image at all").unwrap_err();
    assert!(err.is_asset_load());
    assert!(decode_asset(&[]).unwrap_err().is_asset_load());
}

#[test]
fn truncated_png_is_a_load_failure() {
    let png = encode_png(8, 8, vec![1u8; 8 * 8 * 4]);
    let err = decode_asset(&png[..png.len() / 2]).unwrap_err();
    assert!(err.is_asset_load());
}
