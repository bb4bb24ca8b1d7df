//! Error handling module for Movpress

use thiserror::Error;

/// Main error type for Movpress operations
#[derive(Error, Debug)]
pub enum MovpressError {
    /// Source directory not found or not a directory
    #[error("Source directory not found: {path}")]
    SourceDirNotFound { path: String },

    /// Duration inspection failed to run or produced unparseable output
    #[error("Failed to probe duration of {path}: {message}")]
    Probe { path: String, message: String },

    /// Encode session could not be set up or torn down
    #[error("Encode session error: {message}")]
    Session { message: String },

    /// Encoder subprocess exited with a nonzero status
    #[error("Encoder failed on {path} (exit code {exit_code:?})")]
    Encode {
        path: String,
        exit_code: Option<i32>,
        diagnostics: String,
    },

    /// Trash operation failed after a successful encode
    #[error("Failed to move {path} to trash")]
    Deletion {
        path: String,
        #[source]
        source: trash::Error,
    },

    /// User-requested interrupt; an expected exit path, not a failure
    #[error("Interrupted")]
    Cancelled,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Movpress operations
pub type MovpressResult<T> = std::result::Result<T, MovpressError>;
