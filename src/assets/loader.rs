use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::assets::Bitmap;
use crate::assets::builtin::builtin_bytes;
use crate::assets::decode::decode_asset;
use crate::foundation::error::{MockupError, MockupResult};

/// Reference to a raster asset the pipeline needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssetRef {
    /// Static art addressed by a relative path such as `mockups/iphone-frame.svg`.
    Static(String),
    /// Bytes supplied directly, for example a user upload.
    Inline {
        /// Display name used in logs and errors.
        name: String,
        /// Encoded image bytes.
        bytes: Arc<[u8]>,
    },
}

impl AssetRef {
    /// Static asset reference.
    pub fn static_path(path: impl Into<String>) -> Self {
        Self::Static(path.into())
    }

    /// Inline asset reference.
    pub fn inline(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Inline {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Short human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Self::Static(path) => path,
            Self::Inline { name, .. } => name,
        }
    }
}

/// Asynchronous source of decoded bitmaps.
///
/// A load either yields a complete bitmap or fails; it never yields partially decoded pixels.
/// Implementations must be cheap to share across the per-icon tasks of a generation.
pub trait AssetLoader: Send + Sync + 'static {
    /// Fetch and decode `asset`.
    fn load(&self, asset: &AssetRef) -> impl Future<Output = MockupResult<Bitmap>> + Send;
}

/// Loader for built-in and on-disk static art plus inline uploads.
///
/// Static paths are resolved against `root` first (when set) and fall back to the art embedded
/// in the crate. Decoding runs on the blocking pool so the caller's event loop stays responsive.
#[derive(Debug, Default)]
pub struct StaticAssetLoader {
    root: Option<PathBuf>,
    cache: Option<Mutex<HashMap<String, Bitmap>>>,
}

impl StaticAssetLoader {
    /// Loader serving only the embedded art (and inline refs).
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Loader resolving static paths under `root` before the embedded art.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            cache: None,
        }
    }

    /// Enable or disable the decoded-bitmap cache for static assets.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(|| Mutex::new(HashMap::new()));
        self
    }

    /// Build a loader from configuration.
    pub fn from_config(cfg: &crate::MockupConfig) -> Self {
        let loader = match &cfg.assets_root {
            Some(root) => Self::with_root(root),
            None => Self::builtin(),
        };
        loader.with_cache(cfg.cache_assets)
    }

    /// Number of cached static bitmaps.
    pub fn cached_len(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|c| c.lock().ok().map(|m| m.len()))
            .unwrap_or(0)
    }

    fn cached(&self, norm: &str) -> Option<Bitmap> {
        let cache = self.cache.as_ref()?;
        cache.lock().ok()?.get(norm).cloned()
    }

    fn remember(&self, norm: String, bitmap: &Bitmap) {
        if let Some(cache) = &self.cache
            && let Ok(mut map) = cache.lock()
        {
            map.insert(norm, bitmap.clone());
        }
    }

    async fn read_static(&self, norm: &str) -> MockupResult<Arc<[u8]>> {
        if let Some(root) = &self.root {
            let path = root.join(Path::new(norm));
            match tokio::fs::read(&path).await {
                Ok(bytes) => return Ok(Arc::from(bytes)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "asset not on disk, trying built-in art");
                }
                Err(e) => {
                    return Err(MockupError::asset_load(format!(
                        "failed to read asset '{}': {e}",
                        path.display()
                    )));
                }
            }
        }
        builtin_bytes(norm)
            .map(Arc::from)
            .ok_or_else(|| MockupError::asset_load(format!("unknown static asset '{norm}'")))
    }
}

impl AssetLoader for StaticAssetLoader {
    #[tracing::instrument(level = "debug", skip_all, fields(asset = asset.label()))]
    async fn load(&self, asset: &AssetRef) -> MockupResult<Bitmap> {
        let (norm, bytes) = match asset {
            AssetRef::Static(path) => {
                let norm = normalize_rel_path(path)?;
                if let Some(hit) = self.cached(&norm) {
                    return Ok(hit);
                }
                let bytes = self.read_static(&norm).await?;
                (Some(norm), bytes)
            }
            AssetRef::Inline { bytes, .. } => (None, Arc::clone(bytes)),
        };

        let bitmap = decode_blocking(bytes)
            .await
            .map_err(|e| with_label(e, asset.label()))?;

        if let Some(norm) = norm {
            self.remember(norm, &bitmap);
        }
        Ok(bitmap)
    }
}

async fn decode_blocking(bytes: Arc<[u8]>) -> MockupResult<Bitmap> {
    tokio::task::spawn_blocking(move || decode_asset(&bytes))
        .await
        .map_err(|e| MockupError::asset_load(format!("decode task failed: {e}")))?
}

fn with_label(err: MockupError, label: &str) -> MockupError {
    match err {
        MockupError::AssetLoad(msg) => MockupError::asset_load(format!("'{label}': {msg}")),
        other => other,
    }
}

/// Normalize and validate relative static asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> MockupResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(MockupError::asset_load("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(MockupError::asset_load("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(MockupError::asset_load("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(MockupError::asset_load("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
