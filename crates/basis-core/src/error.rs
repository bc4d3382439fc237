//! Error types for basis-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(u8),

    #[error("Invalid book snapshot: {0}")]
    InvalidBook(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
