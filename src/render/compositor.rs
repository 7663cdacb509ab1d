use std::sync::Arc;
use std::time::Duration;

use crate::assets::Bitmap;
use crate::assets::loader::{AssetLoader, AssetRef};
use crate::foundation::core::{PixelRect, Rgba8Premul};
use crate::foundation::error::{MockupError, MockupResult};
use crate::geometry::crop::{CropWindow, resolve_crop};
use crate::render::blit::{blit_full, blit_scaled};
use crate::render::clock::ClockRenderer;
use crate::render::surface::Surface;
use crate::scene::request::GenerationRequest;
use crate::session::state::GenerationPhase;

/// Draws individual layers onto a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerCompositor {
    background: Rgba8Premul,
}

impl Default for LayerCompositor {
    fn default() -> Self {
        Self::new(Rgba8Premul::transparent())
    }
}

impl LayerCompositor {
    /// Compositor clearing to `background`.
    pub fn new(background: Rgba8Premul) -> Self {
        Self { background }
    }

    /// Compositor using the configured background colour.
    pub fn from_config(cfg: &crate::MockupConfig) -> Self {
        Self::new(Rgba8Premul::from_straight_array(cfg.background_rgba))
    }

    /// Background colour applied by [`LayerCompositor::clear`].
    pub fn background(&self) -> Rgba8Premul {
        self.background
    }

    /// Reset the whole surface to the background.
    pub fn clear(&self, surface: &mut Surface) {
        surface.clear(self.background);
    }

    /// Scale the `crop` window of `wallpaper` into `screen`.
    pub fn draw_wallpaper(
        &self,
        surface: &mut Surface,
        wallpaper: &Bitmap,
        crop: CropWindow,
        screen: PixelRect,
    ) -> MockupResult<()> {
        blit_scaled(surface, wallpaper, crop.to_rect(), screen)
    }

    /// Stretch the device frame over the entire surface.
    pub fn draw_frame(&self, surface: &mut Surface, frame: &Bitmap) -> MockupResult<()> {
        let bounds = surface.canvas().bounds();
        blit_full(surface, frame, bounds)
    }

    /// Draw one icon sprite at `placement`.
    pub fn draw_icon(
        &self,
        surface: &mut Surface,
        sprite: &Bitmap,
        placement: PixelRect,
    ) -> MockupResult<()> {
        blit_full(surface, sprite, placement)
    }
}

/// Destination of one generation's layer commits.
///
/// A target may refuse work at any point (for example after a newer generation started); the
/// pipeline then stops without touching the surface again.
pub(crate) trait LayerTarget {
    /// Record the phase the pipeline entered. Returns `false` when the target no longer accepts
    /// this generation.
    fn enter(&mut self, phase: GenerationPhase) -> bool;

    /// Apply `draw` to the surface. Returns `Ok(false)` without drawing when refused.
    fn commit<F>(&mut self, draw: F) -> MockupResult<bool>
    where
        F: FnOnce(&mut Surface) -> MockupResult<()>;

    /// Mark the generation failed and blank the surface. Returns `false` when refused.
    fn fail(&mut self, err: &MockupError) -> bool;

    /// Store `report` and enter `Ready` in one step. Returns `false` when refused.
    fn finish(&mut self, report: &CompositeReport) -> bool;
}

/// An icon that could not be drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconFailure {
    /// Icon id.
    pub id: String,
    /// Human-readable cause.
    pub reason: String,
}

/// Summary of a finished generation.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeReport {
    /// Source window that was scaled into the screen rectangle.
    pub crop: CropWindow,
    /// Ids of icons drawn, in draw order.
    pub icons_drawn: Vec<String>,
    /// Icons skipped because their sprite failed or timed out.
    pub icons_failed: Vec<IconFailure>,
    /// Whether the clock layer was drawn.
    pub clock_drawn: bool,
}

/// Shared collaborators for one generation.
pub(crate) struct Pipeline<'a, L> {
    pub(crate) loader: &'a Arc<L>,
    pub(crate) layers: &'a LayerCompositor,
    pub(crate) clock: &'a ClockRenderer,
    pub(crate) icon_timeout: Duration,
}

type IconLoad = Result<MockupResult<Bitmap>, tokio::time::error::Elapsed>;

impl<L: AssetLoader> Pipeline<'_, L> {
    /// Run the full layer sequence for `request` against `target`.
    ///
    /// Icon loads are bounded with `tokio::time::timeout`, so the runtime must have its time
    /// driver enabled.
    ///
    /// Returns `Ok(None)` when the target refused a commit part way through. Wallpaper and frame
    /// failures mark the target failed and are returned as errors; icon and clock problems are
    /// recorded in the report.
    pub(crate) async fn composite<T: LayerTarget>(
        &self,
        target: &mut T,
        request: &GenerationRequest,
        source: &AssetRef,
    ) -> MockupResult<Option<CompositeReport>> {
        let screen = request.device.screen_rect();

        if !target.enter(GenerationPhase::LoadingWallpaper) {
            return Ok(None);
        }
        if !target.commit(|s| {
            self.layers.clear(s);
            Ok(())
        })? {
            return Ok(None);
        }

        let wallpaper = match self.loader.load(source).await {
            Ok(bitmap) => bitmap,
            Err(err) => return abort(target, err),
        };
        let crop = match resolve_crop(
            f64::from(wallpaper.width),
            f64::from(wallpaper.height),
            f64::from(screen.width),
            f64::from(screen.height),
        ) {
            Ok(crop) => crop,
            Err(err) => return abort(target, err),
        };
        tracing::debug!(?crop, w = wallpaper.width, h = wallpaper.height, "wallpaper loaded");
        match target.commit(|s| self.layers.draw_wallpaper(s, &wallpaper, crop, screen)) {
            Ok(true) => {}
            Ok(false) => return Ok(None),
            Err(err) => return abort(target, err),
        }

        if !target.enter(GenerationPhase::LoadingFrame) {
            return Ok(None);
        }
        let frame = match self.loader.load(&request.device.frame_asset()).await {
            Ok(bitmap) => bitmap,
            Err(err) => return abort(target, err),
        };
        match target.commit(|s| self.layers.draw_frame(s, &frame)) {
            Ok(true) => {}
            Ok(false) => return Ok(None),
            Err(err) => return abort(target, err),
        }

        let mut report = CompositeReport {
            crop,
            icons_drawn: Vec::new(),
            icons_failed: Vec::new(),
            clock_drawn: false,
        };

        if request.toggles.show_icons {
            if !target.enter(GenerationPhase::LoadingIcons) {
                return Ok(None);
            }
            let loads = self.load_icons(request).await;
            for (icon, load) in request.icons.iter().zip(loads) {
                let sprite = match load {
                    Some(Ok(Ok(bitmap))) => bitmap,
                    Some(Ok(Err(err))) => {
                        report.icons_failed.push(icon_failure(&icon.id, err.to_string()));
                        continue;
                    }
                    Some(Err(_elapsed)) => {
                        report.icons_failed.push(icon_failure(
                            &icon.id,
                            format!("timed out after {:?}", self.icon_timeout),
                        ));
                        continue;
                    }
                    None => {
                        report
                            .icons_failed
                            .push(icon_failure(&icon.id, "load task aborted".to_string()));
                        continue;
                    }
                };
                match target.commit(|s| self.layers.draw_icon(s, &sprite, icon.placement())) {
                    Ok(true) => report.icons_drawn.push(icon.id.clone()),
                    Ok(false) => return Ok(None),
                    Err(err) => report.icons_failed.push(icon_failure(&icon.id, err.to_string())),
                }
            }
        }

        if request.toggles.show_clock {
            if !target.enter(GenerationPhase::DrawingClock) {
                return Ok(None);
            }
            let mut drawn = false;
            let committed = target.commit(|s| {
                drawn = self.clock.draw_clock(s, request.time)?;
                Ok(())
            });
            match committed {
                Ok(true) => report.clock_drawn = drawn,
                Ok(false) => return Ok(None),
                Err(err) => tracing::warn!(%err, "clock layer skipped"),
            }
        }

        if !target.finish(&report) {
            return Ok(None);
        }
        Ok(Some(report))
    }

    /// Start every icon load at once and collect the results in list order.
    async fn load_icons(&self, request: &GenerationRequest) -> Vec<Option<IconLoad>> {
        let mut set = tokio::task::JoinSet::new();
        for (idx, icon) in request.icons.iter().enumerate() {
            let loader = Arc::clone(self.loader);
            let sprite = icon.sprite.clone();
            let timeout = self.icon_timeout;
            set.spawn(async move {
                let res = tokio::time::timeout(timeout, loader.load(&sprite)).await;
                (idx, res)
            });
        }

        let mut out: Vec<Option<IconLoad>> = request.icons.iter().map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((idx, res)) => {
                    if let Some(slot) = out.get_mut(idx) {
                        *slot = Some(res);
                    }
                }
                Err(err) => tracing::warn!(%err, "icon load task failed"),
            }
        }
        out
    }
}

fn icon_failure(id: &str, reason: String) -> IconFailure {
    tracing::warn!(icon = id, %reason, "icon skipped");
    IconFailure {
        id: id.to_string(),
        reason,
    }
}

fn abort<T: LayerTarget>(target: &mut T, err: MockupError) -> MockupResult<Option<CompositeReport>> {
    if target.fail(&err) {
        tracing::warn!(%err, "generation failed");
        Err(err)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
