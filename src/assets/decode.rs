use std::sync::Arc;

use anyhow::Context;

use crate::assets::Bitmap;
use crate::assets::svg_raster::rasterize_svg_to_premul_rgba8;
use crate::foundation::error::{MockupError, MockupResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Largest accepted width or height for decoded assets.
pub(crate) const MAX_DIM: u32 = 16_384;

/// MIME type of SVG documents, which carry no magic bytes for `infer` to match.
pub(crate) const SVG_MIME: &str = "image/svg+xml";

/// Sniff a MIME type from content.
///
/// SVG is recognised by its root element first, since `infer` reports an SVG with an XML
/// prolog as `text/xml`. Everything else is matched by signature.
pub(crate) fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if looks_like_svg(bytes) {
        return Some(SVG_MIME);
    }
    infer::get(bytes).map(|kind| kind.mime_type())
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(4096)]);
    head.trim_start_matches('\u{feff}').trim_start().starts_with('<') && head.contains("<svg")
}

/// Decode any supported image payload (raster or SVG) into a premultiplied bitmap.
pub(crate) fn decode_asset(bytes: &[u8]) -> MockupResult<Bitmap> {
    if bytes.is_empty() {
        return Err(MockupError::asset_load("image payload is empty"));
    }
    match sniff_mime(bytes) {
        Some(SVG_MIME) => decode_svg(bytes),
        Some(mime) if mime.starts_with("image/") => decode_image(bytes),
        Some(mime) => Err(MockupError::asset_load(format!(
            "payload is not an image: {mime}"
        ))),
        None => Err(MockupError::asset_load("unrecognised image format")),
    }
}

pub(crate) fn decode_image(bytes: &[u8]) -> MockupResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| MockupError::asset_load(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    check_dims(width, height)?;

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(Bitmap {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

pub(crate) fn parse_svg(bytes: &[u8]) -> MockupResult<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts)
        .context("parse svg tree")
        .map_err(|e| MockupError::asset_load(format!("{e:#}")))
}

/// Parse an SVG and rasterize it at its intrinsic size.
pub(crate) fn decode_svg(bytes: &[u8]) -> MockupResult<Bitmap> {
    let tree = parse_svg(bytes)?;
    let size = tree.size();
    let width = svg_px(size.width())?;
    let height = svg_px(size.height())?;
    check_dims(width, height)?;

    let rgba8_premul = rasterize_svg_to_premul_rgba8(&tree, width, height)?;
    Ok(Bitmap {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn svg_px(v: f32) -> MockupResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(MockupError::asset_load("svg has invalid width/height"));
    }
    Ok((v.ceil() as u32).max(1))
}

fn check_dims(width: u32, height: u32) -> MockupResult<()> {
    if width == 0 || height == 0 {
        return Err(MockupError::asset_load("image has zero width or height"));
    }
    if width > MAX_DIM || height > MAX_DIM {
        return Err(MockupError::asset_load(format!(
            "image too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
