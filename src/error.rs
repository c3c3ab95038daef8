//! Error types for the gaze estimation library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Eye landmark cloud has fewer rows than the iris ring requires
    #[error("insufficient eye landmarks: need at least {required}, got {found}")]
    InsufficientLandmarks {
        /// Minimum number of rows the iris ring needs
        required: usize,
        /// Number of rows actually supplied
        found: usize,
    },

    /// Named hierarchical eye sub-model is absent from the tracked model
    #[error("eye model not found: {0}")]
    EyeModelNotFound(String),

    /// Invalid input parameters provided
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
