use crate::assets::Bitmap;
use crate::foundation::core::{Canvas, PixelRect, Rgba8Premul};
use crate::foundation::error::{MockupError, MockupResult};
use crate::render::composite::over_in_place;

/// Fixed-size premultiplied RGBA8 raster a generation draws into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Surface {
    /// A fully transparent surface.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![0u8; canvas.rgba_len()],
        }
    }

    /// A transparent 300x600 mockup surface.
    pub fn mockup() -> Self {
        Self::new(Canvas::MOCKUP)
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for dst in self.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    /// Reset to fully transparent.
    pub fn clear_transparent(&mut self) {
        self.data.fill(0);
    }

    /// Return `true` when no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let idx = self.index(x, y);
        let p = &self.data[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Copy of the pixels inside `rect`, row-major.
    pub fn region(&self, rect: PixelRect) -> Vec<u8> {
        let mut out = Vec::with_capacity((rect.width as usize) * (rect.height as usize) * 4);
        for y in rect.y..rect.bottom().min(self.canvas.height) {
            let start = self.index(rect.x.min(self.canvas.width), y);
            let end = self.index(rect.right().min(self.canvas.width), y);
            out.extend_from_slice(&self.data[start..end]);
        }
        out
    }

    /// Composite a full-size premultiplied layer over the surface.
    pub(crate) fn composite_layer(&mut self, layer: &[u8]) -> MockupResult<()> {
        if layer.len() != self.data.len() {
            return Err(MockupError::validation(format!(
                "layer of {} bytes does not match {}x{} surface",
                layer.len(),
                self.canvas.width,
                self.canvas.height
            )));
        }
        over_in_place(&mut self.data, layer)
    }

    /// Snapshot the pixels as an immutable bitmap.
    pub fn to_bitmap(&self) -> MockupResult<Bitmap> {
        Bitmap::from_premul(self.canvas.width, self.canvas.height, self.data.clone())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4
    }
}
