use std::sync::Arc;

pub(crate) mod builtin;
pub(crate) mod decode;
pub(crate) mod loader;
pub(crate) mod svg_raster;

/// Decoded raster asset in premultiplied RGBA8 form.
///
/// Bitmaps are immutable once loaded; clones share the pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Wrap premultiplied pixels, checking the buffer length against the dimensions.
    pub fn from_premul(
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> crate::MockupResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| crate::MockupError::validation("bitmap size overflow"))?;
        if width == 0 || height == 0 || rgba8_premul.len() != expected {
            return Err(crate::MockupError::validation(format!(
                "bitmap buffer of {} bytes does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// A bitmap filled with one straight-alpha colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> crate::MockupResult<Self> {
        let px = crate::Rgba8Premul::from_straight_array(rgba).to_array();
        let len = (width as usize).saturating_mul(height as usize);
        Self::from_premul(width, height, px.repeat(len))
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.rgba8_premul[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }
}
