use thiserror::Error;

/// Main error type for kintree
#[derive(Error, Debug)]
pub enum KintreeError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A blocking database task panicked or was cancelled
    #[error("Blocking task failed: {0}")]
    Join(String),
}

/// Convenient Result type using KintreeError
pub type Result<T> = std::result::Result<T, KintreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KintreeError::Config("missing db_path".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing db_path"));
    }

    #[test]
    fn test_error_from_rusqlite() {
        let sqlite_err = rusqlite::Error::InvalidQuery;
        let err: KintreeError = sqlite_err.into();
        assert!(matches!(err, KintreeError::Database(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: KintreeError = io_err.into();
        assert!(matches!(err, KintreeError::Io(_)));
    }
}
