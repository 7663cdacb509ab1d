use std::sync::Arc;

use crate::assets::decode::{SVG_MIME, sniff_mime};
use crate::assets::loader::AssetRef;
use crate::foundation::error::{MockupError, MockupResult};

/// A file handed over by the file picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as shown to the user.
    pub name: String,
    /// MIME type declared by the picker, if any.
    pub mime: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// File with no declared MIME type.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: None,
            bytes,
        }
    }

    /// Attach a declared MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a file from disk, leaving the MIME type to content sniffing.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> MockupResult<Self> {
        use anyhow::Context as _;

        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    /// Effective MIME type: declared, sniffed, or inferred from an `.svg` extension.
    pub fn effective_mime(&self) -> Option<String> {
        if let Some(mime) = self.mime.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            return Some(mime.to_ascii_lowercase());
        }
        if let Some(mime) = sniff_mime(&self.bytes) {
            return Some(mime.to_string());
        }
        if self.name.to_ascii_lowercase().ends_with(".svg") {
            return Some(SVG_MIME.to_string());
        }
        None
    }
}

/// Accepted upload: immutable bytes shared with the generations that use it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl SourceImage {
    /// Accept `file` when it is a non-empty `image/*` file.
    pub fn from_selected(file: SelectedFile) -> MockupResult<Self> {
        let mime = file.effective_mime().ok_or_else(|| {
            MockupError::invalid_input(format!("'{}' has an unknown file type", file.name))
        })?;
        if !mime.starts_with("image/") {
            return Err(MockupError::invalid_input(format!(
                "'{}' is {mime}, not an image",
                file.name
            )));
        }
        if file.bytes.is_empty() {
            return Err(MockupError::invalid_input(format!(
                "'{}' is empty",
                file.name
            )));
        }
        Ok(Self {
            name: file.name,
            mime,
            bytes: Arc::from(file.bytes),
        })
    }

    /// File name as uploaded.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepted MIME type.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Inline asset reference for the loader.
    pub fn asset(&self) -> AssetRef {
        AssetRef::Inline {
            name: self.name.clone(),
            bytes: Arc::clone(&self.bytes),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/upload.rs"]
mod tests;
