use thiserror::Error;

/// Library error type for caption-canvas operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The selected image is missing, unreadable, or has degenerate dimensions.
    #[error("invalid source image: {0}")]
    BadImage(String),

    /// No usable caption font could be located.
    #[error("no usable caption font: {0}")]
    FontUnavailable(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Image decode/encode error.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Failure reported by the downstream speech synthesizer.
    #[error("speech error: {0}")]
    Speech(anyhow::Error),
}
