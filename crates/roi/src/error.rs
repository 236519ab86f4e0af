use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Invalid polygon: {distinct} distinct points, at least 3 are required")]
    InvalidPolygon { distinct: usize },

    #[error("Mask store is missing required attribute '{key}'")]
    MissingMetadata { key: &'static str },

    #[error("Mask store holds arrays of differing shapes: {shapes:?}")]
    AmbiguousShapeCount { shapes: Vec<[usize; 2]> },

    #[error("Invalid mask store: {0}")]
    InvalidStore(String),

    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raised when a threshold literal is neither an integer percentage nor a float probability.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid threshold '{0}': expected an integer in [0, 100] or a float in [0, 1]")]
pub struct ParseThresholdError(pub String);

pub type Result<T> = std::result::Result<T, RoiError>;
