use std::sync::OnceLock;

use chrono::NaiveTime;

use crate::config::ClockStyle;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::MockupResult;
use crate::render::blur::shadow_blur;
use crate::render::composite::tint_by_alpha;
use crate::render::surface::Surface;
use crate::render::text::{
    FontFace, TextBrushRgba8, TextLayoutEngine, TextPlacement, find_system_bold_face,
    render_centered_text_layer,
};

/// Zero-padded 24-hour `HH:MM`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Draws the clock overlay: bold centered text over a soft shadow.
///
/// The font is resolved on first use and reused by every later generation.
pub struct ClockRenderer {
    style: ClockStyle,
    font: OnceLock<Option<FontFace>>,
}

impl std::fmt::Debug for ClockRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockRenderer")
            .field("style", &self.style)
            .field("font_resolved", &self.font.get().is_some())
            .finish()
    }
}

impl ClockRenderer {
    /// Renderer that resolves its font from `style` lazily.
    pub fn new(style: ClockStyle) -> Self {
        Self {
            style,
            font: OnceLock::new(),
        }
    }

    /// Renderer that never draws (no font available).
    pub(crate) fn without_font(style: ClockStyle) -> Self {
        let font = OnceLock::new();
        let _ = font.set(None);
        Self {
            style,
            font,
        }
    }

    /// Styling in use.
    pub fn style(&self) -> &ClockStyle {
        &self.style
    }

    /// Return `true` when a usable font was found.
    pub fn has_font(&self) -> bool {
        self.font().is_some()
    }

    fn font(&self) -> Option<&FontFace> {
        self.font
            .get_or_init(|| resolve_font(&self.style))
            .as_ref()
    }

    /// Draw `time` onto `surface`.
    ///
    /// Returns `Ok(false)` when the layer was skipped because no font is available.
    #[tracing::instrument(level = "debug", skip_all, fields(time = %time))]
    pub fn draw_clock(&self, surface: &mut Surface, time: NaiveTime) -> MockupResult<bool> {
        let Some(face) = self.font() else {
            tracing::warn!("no font available, clock layer skipped");
            return Ok(false);
        };
        let text = format_clock(time);
        let center_x = surface.width() as f32 / 2.0;

        let mut engine = TextLayoutEngine::new();
        let layer = render_centered_text_layer(
            surface,
            &mut engine,
            face,
            &text,
            TextPlacement {
                size_px: self.style.size_px,
                brush: TextBrushRgba8::from(self.style.color_rgba),
                center_x,
                baseline_y: self.style.baseline_y,
            },
        )?;
        let Some(layer) = layer else {
            tracing::warn!(%text, "clock text shaped to nothing");
            return Ok(false);
        };

        let shadow_color = Rgba8Premul::from_straight_array(self.style.shadow_rgba).to_array();
        if shadow_color[3] > 0 {
            let tinted = tint_by_alpha(&layer, shadow_color);
            let shadow = shadow_blur(
                &tinted,
                surface.width(),
                surface.height(),
                self.style.shadow_blur_px,
            )?;
            surface.composite_layer(&shadow)?;
        }
        surface.composite_layer(&layer)?;
        tracing::debug!(%text, "clock drawn");
        Ok(true)
    }
}

fn resolve_font(style: &ClockStyle) -> Option<FontFace> {
    if let Some(path) = &style.font_path {
        match FontFace::from_path(path) {
            Ok(face) => return Some(face),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "configured clock font unusable, searching system fonts");
            }
        }
    }
    let face = find_system_bold_face(&style.font_families);
    if face.is_none() {
        tracing::warn!("no system font found for the clock");
    }
    face
}

#[cfg(test)]
#[path = "../../tests/unit/render/clock.rs"]
mod tests;
