//! Core domain types for the basis quoting bot.
//!
//! This crate provides fundamental types used throughout the trading system:
//! - `Instrument`: the reference future and the traded ETF
//! - `Price`, `Volume`: integer venue units (minor currency units, lots)
//! - `BookSnapshot`: five-level top of book as reported by the venue
//! - `Side`, `Lifespan`, `OrderId`: order enums and identifiers
//! - `VenueAction`: outbound insert / cancel / hedge requests

pub mod decimal;
pub mod error;
pub mod execution;
pub mod market;
pub mod order;

pub use decimal::{Price, Volume};
pub use error::{CoreError, Result};
pub use execution::VenueAction;
pub use market::{BookSnapshot, Instrument, MAXIMUM_ASK, MINIMUM_BID, TOP_LEVEL_COUNT};
pub use order::{Lifespan, OrderId, Side};
