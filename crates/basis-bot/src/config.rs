//! Application configuration.

use crate::error::{AppError, AppResult};
use basis_strategy::StrategyConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Event input and action output locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// JSON-lines event file. Reads stdin when unset.
    #[serde(default)]
    pub input: Option<String>,
    /// JSON-lines action file. Writes stdout when unset.
    #[serde(default)]
    pub output: Option<String>,
}

/// Telemetry switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Dump Prometheus metrics to the log at shutdown.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Capacity of the inbound event queue.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    #[serde(default)]
    pub strategy: StrategyConfig,

    #[serde(default)]
    pub replay: ReplayConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_channel_capacity() -> usize {
    1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            strategy: StrategyConfig::default(),
            replay: ReplayConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Reject configurations the bot cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        self.strategy.validate()?;
        if self.channel_capacity == 0 {
            return Err(AppError::Config(
                "channel_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
