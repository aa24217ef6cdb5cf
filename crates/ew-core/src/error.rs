//! Error types for EjectWheel

use thiserror::Error;

/// Core error type
///
/// The wheel itself never fails at runtime; refusals are no-ops.
/// Errors only come out of configuration construction and loading.
#[derive(Error, Debug)]
pub enum EwError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias
pub type EwResult<T> = Result<T, EwError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EwError::InvalidConfig("rotations must be >= 1".into());
        assert_eq!(err.to_string(), "Invalid config: rotations must be >= 1");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EwError = io.into();
        assert!(matches!(err, EwError::Io(_)));
    }
}
