//! Basis quoting bot.
//!
//! Wires the strategy to its surroundings:
//! - Event replay from a JSON-lines stream (file or stdin)
//! - A single sequential event loop owning the `AutoTrader`
//! - Action output through an `ActionSink`
//! - Session summary and metrics dump at shutdown

pub mod app;
pub mod config;
pub mod error;
pub mod replay;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use replay::{replay_events, spawn_replay, ReplaySummary};
