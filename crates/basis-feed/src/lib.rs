//! Venue event feed for the basis bot.
//!
//! Defines the inbound `VenueEvent` model and decodes JSON-lines event
//! streams into it.

pub mod error;
pub mod event;
pub mod parser;

pub use error::{FeedError, FeedResult};
pub use event::VenueEvent;
pub use parser::{EventParser, ParseStats};
