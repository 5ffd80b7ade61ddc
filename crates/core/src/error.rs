//! Core Error Types
//!
//! Errors raised by the core crate itself. The application crate wraps these
//! in `AppError`, which adds the HTTP-facing variants.

use thiserror::Error;

/// Core error type for the Interview Coach workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed configuration value
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
