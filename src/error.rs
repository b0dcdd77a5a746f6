//! Error type shared by every stage of the lane isolation pipeline.
//!
//! The pipeline is a deterministic numeric transform with no I/O, so every
//! error is terminal for the frame that produced it. Nothing is retried.

/// Errors that can occur while isolating lane pixels.
#[derive(Debug, thiserror::Error)]
pub enum LaneError {
    /// The frame is empty, has the wrong channel count, or the flat buffer
    /// does not match the declared dimensions.
    #[error("invalid input frame: {0}")]
    InvalidInput(String),

    /// A color-space conversion, derivative or mask combination could not
    /// be performed on the given buffers.
    #[error("conversion failed: {0}")]
    ConversionFailure(String),

    /// A threshold range is malformed (non-finite bound or `low > high`).
    #[error("invalid isolator configuration: {0}")]
    InvalidConfig(String),
}

impl From<ndarray::ShapeError> for LaneError {
    fn from(err: ndarray::ShapeError) -> Self {
        LaneError::ConversionFailure(err.to_string())
    }
}

impl From<serde_json::Error> for LaneError {
    fn from(err: serde_json::Error) -> Self {
        LaneError::InvalidConfig(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LaneError>;
