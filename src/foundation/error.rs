/// Result alias used across the crate.
pub type WavyBgResult<T> = Result<T, WavyBgError>;

/// Errors raised by fallible setup paths (option validation, color parsing, buffer handling).
///
/// Per-frame rendering never surfaces errors; see [`crate::WavyBackground`].
#[derive(thiserror::Error, Debug)]
pub enum WavyBgError {
    /// Invalid construction options.
    #[error("validation error: {0}")]
    Validation(String),

    /// A color value that could not be parsed.
    #[error("color error: {0}")]
    Color(String),

    /// Pixel buffer or rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WavyBgError {
    /// Build a [`WavyBgError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WavyBgError::Color`].
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build a [`WavyBgError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
