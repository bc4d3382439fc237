//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Strategy error: {0}")]
    Core(#[from] basis_core::CoreError),

    #[error("Feed error: {0}")]
    Feed(#[from] basis_feed::FeedError),

    #[error("Executor error: {0}")]
    Executor(#[from] basis_executor::ExecutorError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] basis_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
