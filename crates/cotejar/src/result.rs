//! Result and error types for Cotejar.

use thiserror::Error;

/// Result type for Cotejar operations
pub type CotejarResult<T> = Result<T, CotejarError>;

/// Errors that can occur in Cotejar
#[derive(Debug, Error)]
pub enum CotejarError {
    /// Comparison requested for a configuration with no approved baseline.
    ///
    /// This is a hard stop for the affected configuration: a missing
    /// baseline is never silently treated as "new baseline", since that
    /// would mask accidental baseline deletion.
    #[error("No baseline found for configuration '{name}'. Run an update pass to create it.")]
    MissingBaseline {
        /// Configuration name
        name: String,
    },

    /// The content-hashing mechanism could not produce a digest
    #[error("Content hashing unavailable: {message}")]
    HashingUnavailable {
        /// Error message
        message: String,
    },

    /// Store directories could not be created or written
    #[error("Cannot create or write store directory {path}: {message}")]
    DirectoryUnwritable {
        /// Directory that failed
        path: String,
        /// Error message
        message: String,
    },

    /// Screenshot capture failed
    #[error("Screenshot failed: {message}")]
    ScreenshotError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
