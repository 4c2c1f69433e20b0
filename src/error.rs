//! Error types for Cubby.

use thiserror::Error;

/// Common error type for Cubby.
#[derive(Error, Debug)]
pub enum CubbyError {
    /// Client-supplied file name failed sanitization.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Create target already present in the active store.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Restore destination occupied in the active store.
    #[error("restore conflict: {0} already exists")]
    Conflict(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Cubby operations.
pub type Result<T> = std::result::Result<T, CubbyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_display() {
        let err = CubbyError::InvalidName("../etc".to_string());
        assert_eq!(err.to_string(), "invalid file name: \"../etc\"");
    }

    #[test]
    fn test_not_found_display() {
        let err = CubbyError::NotFound("notes.txt".to_string());
        assert_eq!(err.to_string(), "notes.txt not found");
    }

    #[test]
    fn test_already_exists_display() {
        let err = CubbyError::AlreadyExists("notes.txt".to_string());
        assert_eq!(err.to_string(), "notes.txt already exists");
    }

    #[test]
    fn test_conflict_display() {
        let err = CubbyError::Conflict("notes.txt".to_string());
        assert_eq!(err.to_string(), "restore conflict: notes.txt already exists");
    }

    #[test]
    fn test_validation_error_display() {
        let err = CubbyError::Validation("file too large".to_string());
        assert_eq!(err.to_string(), "validation error: file too large");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CubbyError = io_err.into();
        assert!(matches!(err, CubbyError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(CubbyError::Validation("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
