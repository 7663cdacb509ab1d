//! The session owns the shared surface and sequences generations over it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::assets::loader::{AssetLoader, StaticAssetLoader};
use crate::config::MockupConfig;
use crate::encode::png::{PNG_MIME, encode_png, export_file_name};
use crate::foundation::error::{MockupError, MockupResult};
use crate::render::clock::ClockRenderer;
use crate::render::compositor::{CompositeReport, LayerCompositor, Pipeline};
use crate::render::surface::Surface;
use crate::scene::request::GenerationRequest;

pub(crate) mod state;
pub(crate) mod upload;

use state::{GenerationHandle, GenerationPhase, GenerationToken, SessionState, SharedState, lock_state};
use upload::{SelectedFile, SourceImage};

/// How a call to [`MockupSession::generate`] ended.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationOutcome {
    /// The surface holds the finished mockup.
    Ready(CompositeReport),
    /// A newer upload or generation started first; this one stopped without further writes.
    Superseded {
        /// Token of the abandoned generation.
        token: GenerationToken,
    },
}

impl GenerationOutcome {
    /// The report when the generation finished.
    pub fn report(&self) -> Option<&CompositeReport> {
        match self {
            Self::Ready(report) => Some(report),
            Self::Superseded { .. } => None,
        }
    }
}

/// Encoded mockup ready for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedMockup {
    /// Suggested file name, `wallpaper-mockup-<unix-ms>.png`.
    pub file_name: String,
    /// Always `image/png`.
    pub mime: &'static str,
    /// PNG bytes.
    pub bytes: Vec<u8>,
}

/// In-memory mockup session: one uploaded photo, one surface, one generation at a time.
///
/// All methods take `&self`; a generation that is still awaiting assets when a new upload or
/// generation starts is superseded and never writes again.
pub struct MockupSession<L: AssetLoader = StaticAssetLoader> {
    state: SharedState,
    loader: Arc<L>,
    layers: LayerCompositor,
    clock: ClockRenderer,
    icon_timeout: Duration,
}

impl MockupSession<StaticAssetLoader> {
    /// Session using the built-in/on-disk static art described by `config`.
    pub fn new(config: &MockupConfig) -> MockupResult<Self> {
        Self::with_loader(config, StaticAssetLoader::from_config(config))
    }
}

impl<L: AssetLoader> MockupSession<L> {
    /// Session with a custom asset loader.
    pub fn with_loader(config: &MockupConfig, loader: L) -> MockupResult<Self> {
        config.validate()?;
        Ok(Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            loader: Arc::new(loader),
            layers: LayerCompositor::from_config(config),
            clock: ClockRenderer::new(config.clock.clone()),
            icon_timeout: config.icon_timeout(),
        })
    }

    /// Replace the clock renderer.
    pub fn with_clock(mut self, clock: ClockRenderer) -> Self {
        self.clock = clock;
        self
    }

    /// The asset loader in use.
    pub fn loader(&self) -> &Arc<L> {
        &self.loader
    }

    /// Accept a new upload.
    ///
    /// Non-image files are rejected with [`MockupError::InvalidInput`] and leave the session
    /// untouched. An accepted file supersedes any generation in flight and resets to `Idle`.
    pub fn select_file(&self, file: SelectedFile) -> MockupResult<GenerationToken> {
        let source = SourceImage::from_selected(file).inspect_err(|err| {
            tracing::warn!(%err, "upload rejected");
        })?;
        let mut st = lock_state(&self.state);
        tracing::debug!(name = source.name(), mime = source.mime(), "upload accepted");
        st.source = Some(source);
        Ok(st.restart())
    }

    /// Currently selected upload.
    pub fn source(&self) -> Option<SourceImage> {
        lock_state(&self.state).source.clone()
    }

    /// Compose the selected upload according to `request`.
    ///
    /// Fails with [`MockupError::InvalidInput`] when nothing was uploaded, and with
    /// [`MockupError::AssetLoad`] when the wallpaper or frame could not be loaded (the session is
    /// then `Failed` with a blank surface).
    ///
    /// Icon loads are bounded by the configured timeout, which needs the tokio time driver:
    /// build the runtime with `enable_time()` or `enable_all()` (`#[tokio::main]` and
    /// `#[tokio::test]` already do). Without it tokio panics once icons are requested.
    #[tracing::instrument(level = "debug", skip_all, fields(device = %request.device))]
    pub async fn generate(&self, request: GenerationRequest) -> MockupResult<GenerationOutcome> {
        let (source, token) = {
            let mut st = lock_state(&self.state);
            let source = st
                .source
                .clone()
                .ok_or_else(|| MockupError::invalid_input("no image selected"))?;
            (source, st.restart())
        };
        tracing::debug!(%token, source = source.name(), "generation started");

        let pipeline = Pipeline {
            loader: &self.loader,
            layers: &self.layers,
            clock: &self.clock,
            icon_timeout: self.icon_timeout,
        };
        let mut handle = GenerationHandle::new(Arc::clone(&self.state), token);
        // The handle stores the report together with the `Ready` phase.
        let finished = pipeline
            .composite(&mut handle, &request, &source.asset())
            .await?;

        let Some(report) = finished else {
            tracing::info!(%token, "generation superseded");
            return Ok(GenerationOutcome::Superseded { token });
        };
        tracing::info!(
            %token,
            icons = report.icons_drawn.len(),
            icons_failed = report.icons_failed.len(),
            clock = report.clock_drawn,
            "mockup ready"
        );
        Ok(GenerationOutcome::Ready(report))
    }

    /// Current phase.
    pub fn phase(&self) -> GenerationPhase {
        lock_state(&self.state).phase
    }

    /// Token of the newest generation.
    pub fn token(&self) -> GenerationToken {
        lock_state(&self.state).token
    }

    /// Return `true` once a generation reached `Ready`.
    pub fn can_export(&self) -> bool {
        self.phase() == GenerationPhase::Ready
    }

    /// Report of the finished generation, if any.
    pub fn last_report(&self) -> Option<CompositeReport> {
        lock_state(&self.state).report.clone()
    }

    /// Copy of the finished surface. `None` unless `Ready`.
    pub fn surface(&self) -> Option<Surface> {
        let st = lock_state(&self.state);
        (st.phase == GenerationPhase::Ready).then(|| st.surface.clone())
    }

    /// Encode the finished mockup, naming it after the current time.
    pub fn export(&self) -> MockupResult<ExportedMockup> {
        self.export_at(chrono::Utc::now().timestamp_millis())
    }

    /// Encode the finished mockup, naming it after `unix_ms`.
    pub fn export_at(&self, unix_ms: i64) -> MockupResult<ExportedMockup> {
        let st = lock_state(&self.state);
        if st.phase != GenerationPhase::Ready {
            return Err(MockupError::encoding(format!(
                "nothing to export while {:?}",
                st.phase
            )));
        }
        let bytes = encode_png(&st.surface)?;
        Ok(ExportedMockup {
            file_name: export_file_name(unix_ms),
            mime: PNG_MIME,
            bytes,
        })
    }
}
