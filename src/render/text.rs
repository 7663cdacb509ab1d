use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Affine;
use crate::foundation::error::{MockupError, MockupResult};
use crate::render::blit::{affine_to_cpu, surface_dims_u16};
use crate::render::surface::Surface;

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<[u8; 4]> for TextBrushRgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Raw font file plus the face index inside it.
#[derive(Clone, Debug)]
pub(crate) struct FontFace {
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) index: u32,
}

impl FontFace {
    /// Read a font file from disk (face 0).
    pub(crate) fn from_path(path: &Path) -> MockupResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            MockupError::validation(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
        })
    }
}

/// Find a bold face among system fonts, trying `families` first and then generic sans-serif.
pub(crate) fn find_system_bold_face(families: &[String]) -> Option<FontFace> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.faces().count(), "loaded system fonts");

    let mut stack = families
        .iter()
        .map(|f| usvg::fontdb::Family::Name(f.as_str()))
        .collect::<Vec<_>>();
    stack.push(usvg::fontdb::Family::SansSerif);

    let query = usvg::fontdb::Query {
        families: &stack,
        weight: usvg::fontdb::Weight::BOLD,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    db.with_face_data(id, |data, index| FontFace {
        bytes: Arc::new(data.to_vec()),
        index,
    })
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape a single bold line of plain text using the provided font bytes.
    pub(crate) fn layout_bold_line(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> MockupResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(MockupError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            MockupError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MockupError::validation("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Where and how a single line of text is placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TextPlacement {
    pub(crate) size_px: f32,
    pub(crate) brush: TextBrushRgba8,
    /// Horizontal center of the line.
    pub(crate) center_x: f32,
    /// Position of the first baseline.
    pub(crate) baseline_y: f32,
}

/// Rasterize `text` into a transparent layer the size of `surface`.
///
/// Returns `None` when the text shapes to nothing.
pub(crate) fn render_centered_text_layer(
    surface: &Surface,
    engine: &mut TextLayoutEngine,
    face: &FontFace,
    text: &str,
    placement: TextPlacement,
) -> MockupResult<Option<Vec<u8>>> {
    let layout = engine.layout_bold_line(
        text,
        face.bytes.as_slice(),
        placement.size_px,
        placement.brush,
    )?;
    let Some(first_line) = layout.lines().next() else {
        return Ok(None);
    };
    let origin_x = placement.center_x - layout.width() / 2.0;
    let origin_y = placement.baseline_y - first_line.metrics().baseline;

    let (w, h) = surface_dims_u16(surface)?;
    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
        face.index,
    );

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(Affine::translate((
        f64::from(origin_x),
        f64::from(origin_y),
    ))));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            // Positions include the run offset, accumulated advances and the line baseline.
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
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(Some(pixmap.data_as_u8_slice().to_vec()))
}
