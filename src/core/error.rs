//! Error types for Gapfill
//!
//! Defines all error types used throughout the library.
//!
//! Residual gaps that no tier can fill are not errors: they are returned
//! as data in [`Reconciliation::unfillable`](crate::core::Reconciliation)
//! and reported as a warning.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Gapfill operations
#[derive(Debug, Error)]
pub enum GapfillError {
    /// Input table does not exist
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input table does not parse into four columns of the expected types
    #[error("Malformed input at line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GapfillError {
    /// Shorthand for a [`GapfillError::MalformedInput`]
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        GapfillError::MalformedInput {
            line,
            message: message.into(),
        }
    }

    /// Whether the error means the input path was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, GapfillError::InputNotFound(_))
    }
}

/// Result type alias for Gapfill operations
pub type Result<T> = std::result::Result<T, GapfillError>;
