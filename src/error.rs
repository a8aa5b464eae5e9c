use thiserror::Error;

/// Errors raised while encoding or decoding state stored in the URL fragment
#[derive(Debug, Error)]
pub enum HashedStateError {
    #[error("Failed to encode or decode state value: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Segment '{0}' is not valid percent-encoded UTF-8")]
    InvalidEncoding(String),
}

/// Errors that can occur while rasterizing and saving a preview
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot export an empty {0}x{1} image")]
    EmptyImage(u32, u32),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser refused the download: {0}")]
    Browser(String),
}

/// Invalid editor configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Canvas size must be positive, got {0}")]
    InvalidCanvasSize(f32),

    #[error("Grid spacing must be positive, got {0}")]
    InvalidGridSpacing(f32),

    #[error("Close distance must not be negative, got {0}")]
    InvalidCloseDistance(f32),

    #[error("Preview size {0} must be between 1 and the canvas size")]
    InvalidPreviewSize(u32),
}
