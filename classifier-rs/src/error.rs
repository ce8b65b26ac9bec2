//! Error types for classifier-rs

use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Classifier error types
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The corpus or training parameters cannot produce a valid model
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Prediction was requested before a model was trained
    #[error("Model has not been trained")]
    UninitializedModel,

    /// IO error while reading a corpus asset
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed corpus asset
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
