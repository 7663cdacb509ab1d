/// Convenience result type used across the crate.
pub type MockupResult<T> = Result<T, MockupError>;

/// Top-level error taxonomy used by mockup APIs.
#[derive(thiserror::Error, Debug)]
pub enum MockupError {
    /// A selected file was rejected at the input boundary (for example a non-image MIME type).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A wallpaper, frame or icon asset could not be fetched or decoded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// Export was requested while no finished surface was available.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Invalid parameters or configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MockupError {
    /// Build a [`MockupError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`MockupError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`MockupError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`MockupError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MockupError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors that abort a generation because a required layer failed to load.
    pub fn is_asset_load(&self) -> bool {
        matches!(self, Self::AssetLoad(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
