use thiserror::Error;

use crate::id_generator::ElementId;
use crate::image_store::SourceRef;

/// Errors raised by the editing engine.
///
/// None of these are fatal. Callers that drive the engine from raw input treat
/// them as no-ops; they are surfaced mainly so tests and logs can see them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("no element with id {0}")]
    NotFound(ElementId),

    #[error("invalid gesture: {0}")]
    InvalidGesture(&'static str),

    #[error("image {0} has not resolved yet")]
    UnresolvedResource(SourceRef),

    #[error("duplicate element id {0}")]
    DuplicateId(ElementId),
}

/// Failures reported by external image services (generation, fetching, decoding).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("the request was cancelled")]
    Cancelled,

    #[error("no generation backend is configured")]
    Unavailable,
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Request(err.to_string())
    }
}

impl From<image::ImageError> for ServiceError {
    fn from(err: image::ImageError) -> Self {
        ServiceError::Decode(err.to_string())
    }
}

impl From<futures::channel::oneshot::Canceled> for ServiceError {
    fn from(_: futures::channel::oneshot::Canceled) -> Self {
        ServiceError::Cancelled
    }
}

/// Errors loading the canvas configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid color {value:?} for {field}")]
    InvalidColor { field: &'static str, value: String },

    #[error("canvas size must be positive, got {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
}
