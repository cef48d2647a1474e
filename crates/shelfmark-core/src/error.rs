//! Error types for shelfmark.

use thiserror::Error;

/// Result type alias using shelfmark's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for shelfmark operations.
///
/// Title resolution never produces one of these: resolver failures degrade
/// to the URL itself. What remains is persistence, input, and setup.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
