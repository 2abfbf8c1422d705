//! Error types for boxwood.

use std::io;

/// Error type for boxwood operations.
#[derive(Debug, thiserror::Error)]
pub enum BoxwoodError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal operation failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Layout calculation failed.
    #[error("layout error: {0}")]
    Layout(String),

    /// Widget error.
    #[error("widget error: {0}")]
    Widget(String),

    /// Name-path lookup failed.
    #[error("lookup error: {0}")]
    Lookup(String),
}

/// Result type alias for boxwood operations.
pub type Result<T> = std::result::Result<T, BoxwoodError>;
