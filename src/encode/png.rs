use image::ImageEncoder as _;

use crate::foundation::error::{MockupError, MockupResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::surface::Surface;

/// MIME type of exported mockups.
pub const PNG_MIME: &str = "image/png";

/// Download file name for an export made at `unix_ms`.
pub fn export_file_name(unix_ms: i64) -> String {
    format!("wallpaper-mockup-{unix_ms}.png")
}

/// Encode `surface` as a straight-alpha RGBA PNG at native resolution.
///
/// The same pixels always produce the same bytes. A surface with no coverage at all is rejected.
pub fn encode_png(surface: &Surface) -> MockupResult<Vec<u8>> {
    if surface.is_blank() {
        return Err(MockupError::encoding("surface is empty"));
    }
    let mut straight = surface.data().to_vec();
    unpremultiply_rgba8_in_place(&mut straight);

    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            &straight,
            surface.width(),
            surface.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| MockupError::encoding(format!("png encode failed: {e}")))?;
    tracing::debug!(bytes = out.len(), "png encoded");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
