//! Error types for studium.

use thiserror::Error;

/// Result type alias using studium's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for studium operations.
///
/// Every public operation either returns its declared success value or fails
/// with exactly one of these kinds; nothing is swallowed and nothing is
/// retried below the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad caller input (empty folder name, no question type selected, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity id unknown
    #[error("Not found: {0}")]
    NotFound(String),

    /// Completion provider returned zero candidates
    #[error("Completion provider returned no candidates")]
    EmptyCompletion,

    /// Model output violates the expected output grammar
    #[error("Generation format error: {0}")]
    GenerationFormat(String),

    /// Completion provider transport or upstream failure (timeouts included)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Upstream text extraction failed
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Identity verification rejected the caller
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Provider(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("folder name must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: folder name must not be empty"
        );
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("space 42".to_string());
        assert_eq!(err.to_string(), "Not found: space 42");
    }

    #[test]
    fn test_error_display_empty_completion() {
        let err = Error::EmptyCompletion;
        assert_eq!(
            err.to_string(),
            "Completion provider returned no candidates"
        );
    }

    #[test]
    fn test_error_display_generation_format() {
        let err = Error::GenerationFormat("no valid question blocks".to_string());
        assert_eq!(
            err.to_string(),
            "Generation format error: no valid question blocks"
        );
    }

    #[test]
    fn test_error_display_provider() {
        let err = Error::Provider("connection refused".to_string());
        assert_eq!(err.to_string(), "Provider error: connection refused");
    }

    #[test]
    fn test_error_display_extraction() {
        let err = Error::Extraction("no readable content".to_string());
        assert_eq!(err.to_string(), "Extraction failed: no readable content");
    }

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("invalid token".to_string());
        assert_eq!(err.to_string(), "Unauthorized: invalid token");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("I/O error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
