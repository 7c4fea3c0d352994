//! Error types for Sortbox.

use thiserror::Error;

/// Common error type for Sortbox.
#[derive(Error, Debug)]
pub enum SortboxError {
    /// I/O error.
    ///
    /// Permission problems, a full disk or a failed move all end up here.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for Sortbox operations.
pub type Result<T> = std::result::Result<T, SortboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = SortboxError::Validation("file name is empty".to_string());
        assert_eq!(err.to_string(), "validation error: file name is empty");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = SortboxError::NotFound("File: report.pdf".to_string());
        assert_eq!(err.to_string(), "File: report.pdf not found");
    }

    #[test]
    fn test_config_error_display() {
        let err = SortboxError::Config("upload_dir is empty".to_string());
        assert_eq!(err.to_string(), "configuration error: upload_dir is empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: SortboxError = io_err.into();
        assert!(matches!(err, SortboxError::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }
}
