//! Prometheus metrics and structured logging for the basis bot.
//!
//! - Prometheus metrics for quoting, hedging, fills and venue errors
//! - Structured JSON logging with tracing

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, init_logging_with, LogFormat};
pub use metrics::Metrics;
