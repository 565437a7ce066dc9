//! # Error Types
//!
//! This module defines error types used throughout the yeardots library.
//!
//! Every operation in the render pipeline is deterministic, so nothing here
//! is retried: an error is reported to the caller as soon as it is seen.

use thiserror::Error;

/// Main error type for yeardots operations
#[derive(Debug, Error)]
pub enum YearDotsError {
    /// Time zone name that is not a known IANA identifier
    #[error("Invalid time zone: '{0}'")]
    InvalidTimeZone(String),

    /// Geometric precondition failure (degenerate canvas, zero columns,
    /// a grid that cannot fit its content area)
    #[error("Invalid geometry: {0}")]
    Geometry(String),

    /// The image encoder could not produce output
    #[error("Encoding failure: {0}")]
    Encoding(String),

    /// HTTP server setup or runtime error
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl YearDotsError {
    /// True for errors caused by caller input rather than by the renderer.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            YearDotsError::InvalidTimeZone(_) | YearDotsError::Geometry(_)
        )
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, YearDotsError>;
