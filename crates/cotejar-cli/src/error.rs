//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// A comparison or store audit found drift
    #[error("Validation failed: {message}")]
    Validation {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cotejar library error
    #[error("{0}")]
    Cotejar(#[from] cotejar::CotejarError),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("bad name");
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.to_string().contains("bad name"));
    }

    #[test]
    fn test_validation_error() {
        let err = CliError::validation("drift detected");
        assert!(err.to_string().contains("Validation failed"));
    }

    #[test]
    fn test_library_error_passthrough() {
        let err: CliError = cotejar::CotejarError::MissingBaseline {
            name: "x".to_string(),
        }
        .into();
        assert!(err.to_string().contains("No baseline"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }
}
