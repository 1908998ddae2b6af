//! Error types for the canvas crate.

use thiserror::Error;

/// Errors that can occur on the sketch surface.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CanvasError {
    /// PNG encode or decode failure.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Stroke file could not be parsed.
    #[error("invalid strokes file: {0}")]
    StrokeFile(#[from] serde_json::Error),

    /// Raster buffer does not match the declared dimensions.
    #[error("invalid raster: {0}")]
    InvalidRaster(String),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
