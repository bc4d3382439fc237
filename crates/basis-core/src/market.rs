//! Instruments and order book snapshots.

use crate::decimal::{Price, Volume};
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of price levels per side in a venue book snapshot.
pub const TOP_LEVEL_COUNT: usize = 5;

/// Lowest bid price the venue accepts.
pub const MINIMUM_BID: u64 = 1;

/// Highest ask price the venue accepts.
pub const MAXIMUM_ASK: u64 = 2_147_483_647;

/// The two instruments the strategy sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    /// Reference instrument, used only as a fair-value signal and for hedging.
    Future,
    /// Traded instrument, quoted by the strategy.
    Etf,
}

impl Instrument {
    /// Venue wire code.
    pub fn code(&self) -> u8 {
        match self {
            Self::Future => 0,
            Self::Etf => 1,
        }
    }
}

impl TryFrom<u8> for Instrument {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Future),
            1 => Ok(Self::Etf),
            other => Err(CoreError::UnknownInstrument(other)),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Future => write!(f, "future"),
            Self::Etf => write!(f, "etf"),
        }
    }
}

/// Top-of-book snapshot for one instrument.
///
/// Prices and volumes are best-first. Missing levels are reported as zero,
/// so `bid_prices[0] == 0` means the bid side is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub ask_prices: [Price; TOP_LEVEL_COUNT],
    pub ask_volumes: [Volume; TOP_LEVEL_COUNT],
    pub bid_prices: [Price; TOP_LEVEL_COUNT],
    pub bid_volumes: [Volume; TOP_LEVEL_COUNT],
}

impl BookSnapshot {
    /// Create a snapshot from full level arrays.
    pub fn new(
        ask_prices: [Price; TOP_LEVEL_COUNT],
        ask_volumes: [Volume; TOP_LEVEL_COUNT],
        bid_prices: [Price; TOP_LEVEL_COUNT],
        bid_volumes: [Volume; TOP_LEVEL_COUNT],
    ) -> Self {
        Self {
            ask_prices,
            ask_volumes,
            bid_prices,
            bid_volumes,
        }
    }

    /// Snapshot with only the best level populated.
    pub fn top(bid: u64, bid_volume: u64, ask: u64, ask_volume: u64) -> Self {
        let mut snapshot = Self::empty();
        snapshot.bid_prices[0] = Price::new(bid);
        snapshot.bid_volumes[0] = Volume::new(bid_volume);
        snapshot.ask_prices[0] = Price::new(ask);
        snapshot.ask_volumes[0] = Volume::new(ask_volume);
        snapshot
    }

    /// Snapshot with every level empty.
    pub fn empty() -> Self {
        Self {
            ask_prices: [Price::ZERO; TOP_LEVEL_COUNT],
            ask_volumes: [Volume::ZERO; TOP_LEVEL_COUNT],
            bid_prices: [Price::ZERO; TOP_LEVEL_COUNT],
            bid_volumes: [Volume::ZERO; TOP_LEVEL_COUNT],
        }
    }

    #[inline]
    pub fn best_bid(&self) -> Price {
        self.bid_prices[0]
    }

    #[inline]
    pub fn best_ask(&self) -> Price {
        self.ask_prices[0]
    }

    /// True when both best prices are non-zero.
    pub fn is_two_sided(&self) -> bool {
        !self.best_bid().is_zero() && !self.best_ask().is_zero()
    }

    /// (best bid + best ask) / 2, without validity checks.
    pub fn mid_price(&self) -> Decimal {
        (self.best_bid().to_decimal() + self.best_ask().to_decimal()) / Decimal::TWO
    }
}
