//! Outbound action delivery.
//!
//! The strategy returns `VenueAction`s; this crate hands them to whatever
//! sits on the other side of the venue boundary:
//! - `ChannelSink`: an in-process tokio channel (connectivity task, tests)
//! - `JsonLinesSink`: timestamped JSON lines on any async writer
//! - `MockActionSink`: records actions for assertions
//!
//! Sends are fire-and-forget from the strategy's point of view. The
//! `ActionDispatcher` forwards a batch in order, logs failures and keeps
//! going.

pub mod dispatcher;
pub mod error;
pub mod sink;

pub use dispatcher::{ActionDispatcher, DispatchStats};
pub use error::{ExecutorError, ExecutorResult};
pub use sink::{ActionRecord, ActionSink, BoxFuture, ChannelSink, DynActionSink, JsonLinesSink, MockActionSink};
