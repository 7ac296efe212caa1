//! Error types for the paced library.

use thiserror::Error;

/// Main error type for paced operations.
#[derive(Error, Debug)]
pub enum PacedError {
    /// A limiter was constructed with a non-positive or non-finite rate
    #[error("invalid rate {0}: must be positive and finite")]
    InvalidRate(f64),

    /// A leaky bucket was constructed with a non-positive or non-finite burst
    #[error("invalid burst {0}: must be positive and finite")]
    InvalidBurst(f64),

    /// A windowed limiter was constructed with a non-positive or non-finite window
    #[error("invalid window {0}: must be positive and finite")]
    InvalidWindow(f64),

    /// A windowed limiter was constructed with a zero request budget
    #[error("invalid max {0}: must be at least 1")]
    InvalidMax(u32),

    /// A safety margin outside the half-open range [0, 1)
    #[error("invalid margin {0}: must be in [0, 1)")]
    InvalidMargin(f64),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for paced operations.
pub type Result<T> = std::result::Result<T, PacedError>;
