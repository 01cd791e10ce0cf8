/// Convenience result type used across adframe.
pub type AdframeResult<T> = Result<T, AdframeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Nothing raised while drawing a preview is fatal: the compositor logs these and skips the
/// affected layer. They surface directly only from loading, validation and CLI paths.
#[derive(thiserror::Error, Debug)]
pub enum AdframeError {
    /// Invalid template, color or host-supplied input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure fetching, reading or decoding an image asset.
    #[error("asset error: {0}")]
    Asset(String),

    /// Failure issuing draw commands to a surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdframeError {
    /// Build an [`AdframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AdframeError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build an [`AdframeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`AdframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
