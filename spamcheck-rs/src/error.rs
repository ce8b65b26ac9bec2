//! Error types for spamcheck-rs

use classifier_rs::ClassifierError;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Service error types
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Classifier error
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored record could not be decoded
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Whether the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Database(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(ServiceError::Database(sqlx::Error::PoolClosed).is_retryable());
        assert!(!ServiceError::Config("bad".to_string()).is_retryable());
        assert!(!ServiceError::Classifier(ClassifierError::UninitializedModel).is_retryable());
    }

    #[test]
    fn test_classifier_error_converts() {
        let err: ServiceError = ClassifierError::Configuration("no ham".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Classifier error: Configuration error: no ham"
        );
    }
}
