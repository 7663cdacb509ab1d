use std::sync::Arc;

use crate::assets::Bitmap;
use crate::foundation::core::{Affine, PixelRect, Rect};
use crate::foundation::error::{MockupError, MockupResult};
use crate::render::surface::Surface;

/// Scale the `src` window of `bitmap` into `dst` and composite it over `surface`.
///
/// Pixels outside `dst` are left untouched.
pub(crate) fn blit_scaled(
    surface: &mut Surface,
    bitmap: &Bitmap,
    src: Rect,
    dst: PixelRect,
) -> MockupResult<()> {
    let layer = render_bitmap_layer(surface, bitmap, src, dst)?;
    surface.composite_layer(&layer)
}

/// Draw the whole bitmap stretched over `dst`.
pub(crate) fn blit_full(surface: &mut Surface, bitmap: &Bitmap, dst: PixelRect) -> MockupResult<()> {
    let src = Rect::new(0.0, 0.0, f64::from(bitmap.width), f64::from(bitmap.height));
    blit_scaled(surface, bitmap, src, dst)
}

fn render_bitmap_layer(
    surface: &Surface,
    bitmap: &Bitmap,
    src: Rect,
    dst: PixelRect,
) -> MockupResult<Vec<u8>> {
    let (bw, bh) = (f64::from(bitmap.width), f64::from(bitmap.height));
    if !(src.width() > 0.0 && src.height() > 0.0) {
        return Err(MockupError::validation("blit source window must be non-empty"));
    }
    if src.x0 < 0.0 || src.y0 < 0.0 || src.x1 > bw || src.y1 > bh {
        return Err(MockupError::validation(format!(
            "blit source window {src:?} exceeds {}x{} bitmap",
            bitmap.width, bitmap.height
        )));
    }
    if dst.width == 0 || dst.height == 0 {
        return Err(MockupError::validation("blit destination must be non-empty"));
    }

    let (w, h) = surface_dims_u16(surface)?;
    let image = bitmap_to_image(bitmap)?;

    let kx = f64::from(dst.width) / src.width();
    let ky = f64::from(dst.height) / src.height();
    let tr = Affine::translate((f64::from(dst.x), f64::from(dst.y)))
        * Affine::scale_non_uniform(kx, ky)
        * Affine::translate((-src.x0, -src.y0));

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint(image);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(src.x0, src.y0, src.x1, src.y1));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap.data_as_u8_slice().to_vec())
}

pub(crate) fn surface_dims_u16(surface: &Surface) -> MockupResult<(u16, u16)> {
    let w: u16 = surface
        .width()
        .try_into()
        .map_err(|_| MockupError::validation("surface width exceeds u16"))?;
    let h: u16 = surface
        .height()
        .try_into()
        .map_err(|_| MockupError::validation("surface height exceeds u16"))?;
    Ok((w, h))
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bitmap_to_image(bitmap: &Bitmap) -> MockupResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&bitmap.rgba8_premul, bitmap.width, bitmap.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> MockupResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MockupError::validation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MockupError::validation("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(MockupError::validation("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; bitmap bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    let may_have_opacities = bytes.chunks_exact(4).any(|px| px[3] != 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/blit.rs"]
mod tests;
