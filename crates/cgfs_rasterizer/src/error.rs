use cgfs_core::CanvasError;
use thiserror::Error;

/// Errors that can occur while rendering a raster scene.
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),
}

pub type RasterResult<T> = Result<T, RasterError>;
