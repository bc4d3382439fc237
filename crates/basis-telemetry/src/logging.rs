//! Structured logging initialization.

use crate::error::{TelemetryError, TelemetryResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "info,basis=debug";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for log shippers.
    Json,
    /// Multi-line human readable output.
    Pretty,
    /// Single-line human readable output, for piping replays.
    Compact,
}

impl LogFormat {
    /// Format from the environment.
    ///
    /// `BASIS_LOG_FORMAT` (`json`, `pretty`, `compact`) wins; otherwise
    /// `RUST_ENV=production` selects JSON and anything else pretty.
    pub fn from_env() -> Self {
        let explicit = std::env::var("BASIS_LOG_FORMAT").ok();
        let rust_env = std::env::var("RUST_ENV").ok();
        Self::resolve(explicit.as_deref(), rust_env.as_deref())
    }

    fn resolve(explicit: Option<&str>, rust_env: Option<&str>) -> Self {
        match explicit.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => return Self::Json,
            Some("pretty") => return Self::Pretty,
            Some("compact") => return Self::Compact,
            _ => {}
        }
        if rust_env == Some("production") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Initialize structured logging with the format chosen by the environment.
///
/// `RUST_LOG` overrides the default filter. Fails if a global subscriber is
/// already installed.
pub fn init_logging() -> TelemetryResult<()> {
    init_logging_with(LogFormat::from_env())
}

/// Initialize structured logging with an explicit format.
pub fn init_logging_with(format: LogFormat) -> TelemetryResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_target(true))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_target(false))
            .try_init(),
    };

    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_format_wins() {
        assert_eq!(
            LogFormat::resolve(Some("compact"), Some("production")),
            LogFormat::Compact
        );
        assert_eq!(LogFormat::resolve(Some("JSON"), None), LogFormat::Json);
    }

    #[test]
    fn test_rust_env_fallback() {
        assert_eq!(LogFormat::resolve(None, Some("production")), LogFormat::Json);
        assert_eq!(LogFormat::resolve(None, Some("dev")), LogFormat::Pretty);
        assert_eq!(LogFormat::resolve(Some("xml"), None), LogFormat::Pretty);
    }
}
