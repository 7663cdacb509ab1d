use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::foundation::error::{MockupError, MockupResult};
use crate::render::compositor::{CompositeReport, LayerTarget};
use crate::render::surface::Surface;
use crate::session::upload::SourceImage;

/// Where a generation currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GenerationPhase {
    /// Nothing in flight; the surface is blank.
    #[default]
    Idle,
    /// Decoding the uploaded wallpaper.
    LoadingWallpaper,
    /// Fetching the device frame.
    LoadingFrame,
    /// Fetching and drawing icon sprites.
    LoadingIcons,
    /// Drawing the clock overlay.
    DrawingClock,
    /// The surface holds a finished mockup.
    Ready,
    /// Wallpaper or frame failed; the surface is blank.
    Failed,
}

impl GenerationPhase {
    /// Return `true` while a generation is running.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Self::LoadingWallpaper | Self::LoadingFrame | Self::LoadingIcons | Self::DrawingClock
        )
    }
}

/// Monotonic generation identifier. Only the holder of the newest token may write the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationToken(u64);

impl GenerationToken {
    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for GenerationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) token: GenerationToken,
    pub(crate) phase: GenerationPhase,
    pub(crate) surface: Surface,
    pub(crate) source: Option<SourceImage>,
    pub(crate) report: Option<CompositeReport>,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self {
            token: GenerationToken::default(),
            phase: GenerationPhase::Idle,
            surface: Surface::mockup(),
            source: None,
            report: None,
        }
    }

    /// Invalidate whatever is in flight and return to a blank `Idle` surface.
    pub(crate) fn restart(&mut self) -> GenerationToken {
        self.token = self.token.next();
        self.phase = GenerationPhase::Idle;
        self.surface.clear_transparent();
        self.report = None;
        self.token
    }
}

pub(crate) type SharedState = Arc<Mutex<SessionState>>;

pub(crate) fn lock_state(state: &SharedState) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Write access to the session surface for one generation.
///
/// Every call re-checks the token under the lock, so a superseded generation can never touch the
/// surface or phase again.
pub(crate) struct GenerationHandle {
    state: SharedState,
    token: GenerationToken,
}

impl GenerationHandle {
    pub(crate) fn new(state: SharedState, token: GenerationToken) -> Self {
        Self { state, token }
    }

    fn current(&self) -> Option<MutexGuard<'_, SessionState>> {
        let st = lock_state(&self.state);
        if st.token == self.token {
            Some(st)
        } else {
            tracing::debug!(stale = %self.token, current = %st.token, "stale generation ignored");
            None
        }
    }
}

impl LayerTarget for GenerationHandle {
    fn enter(&mut self, phase: GenerationPhase) -> bool {
        let Some(mut st) = self.current() else {
            return false;
        };
        tracing::debug!(token = %self.token, from = ?st.phase, to = ?phase, "phase");
        st.phase = phase;
        true
    }

    fn commit<F>(&mut self, draw: F) -> MockupResult<bool>
    where
        F: FnOnce(&mut Surface) -> MockupResult<()>,
    {
        let Some(mut st) = self.current() else {
            return Ok(false);
        };
        draw(&mut st.surface)?;
        Ok(true)
    }

    fn fail(&mut self, err: &MockupError) -> bool {
        let Some(mut st) = self.current() else {
            return false;
        };
        tracing::debug!(token = %self.token, from = ?st.phase, %err, "phase -> Failed");
        st.surface.clear_transparent();
        st.phase = GenerationPhase::Failed;
        st.report = None;
        true
    }

    fn finish(&mut self, report: &CompositeReport) -> bool {
        let Some(mut st) = self.current() else {
            return false;
        };
        tracing::debug!(token = %self.token, from = ?st.phase, "phase -> Ready");
        st.report = Some(report.clone());
        st.phase = GenerationPhase::Ready;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
