//! Strategy configuration.

use basis_core::{CoreError, Price, MAXIMUM_ASK, MINIMUM_BID};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quoting and hedging parameters.
///
/// Prices are in the venue's minor currency units, volumes in lots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Sizing unit, reported alongside order volumes.
    #[serde(default = "default_lot_size")]
    pub lot_size: u64,

    /// Maximum absolute net position in lots.
    #[serde(default = "default_position_limit")]
    pub position_limit: i64,

    /// Venue tick size.
    #[serde(default = "default_tick_size")]
    pub tick_size: u64,

    /// Extra edge added on top of `tick_size + mu` before acting.
    #[serde(default)]
    pub gamma: Decimal,

    /// Lowest bid price the venue accepts.
    #[serde(default = "default_minimum_bid")]
    pub minimum_bid: u64,

    /// Highest ask price the venue accepts.
    #[serde(default = "default_maximum_ask")]
    pub maximum_ask: u64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            lot_size: default_lot_size(),
            position_limit: default_position_limit(),
            tick_size: default_tick_size(),
            gamma: Decimal::ZERO,
            minimum_bid: default_minimum_bid(),
            maximum_ask: default_maximum_ask(),
        }
    }
}

impl StrategyConfig {
    /// Lowest tick-aligned price strictly above `minimum_bid`.
    ///
    /// Sell hedges are pinned here so they always cross the book.
    pub fn min_bid_nearest_tick(&self) -> Price {
        Price::new(self.minimum_bid + self.tick_size).round_down_to_tick(self.tick_size)
    }

    /// Highest tick-aligned price not above `maximum_ask`.
    ///
    /// Buy hedges are pinned here so they always cross the book.
    pub fn max_ask_nearest_tick(&self) -> Price {
        Price::new(self.maximum_ask).round_down_to_tick(self.tick_size)
    }

    /// Tick size as a decimal, for threshold arithmetic.
    pub fn tick_decimal(&self) -> Decimal {
        Decimal::from(self.tick_size)
    }

    /// Reject parameter sets the strategy cannot run with.
    pub fn validate(&self) -> basis_core::Result<()> {
        if self.position_limit <= 0 {
            return Err(CoreError::InvalidConfig(format!(
                "position_limit must be positive, got {}",
                self.position_limit
            )));
        }
        if self.tick_size == 0 {
            return Err(CoreError::InvalidConfig(
                "tick_size must be non-zero".to_string(),
            ));
        }
        if self.minimum_bid >= self.maximum_ask {
            return Err(CoreError::InvalidConfig(format!(
                "minimum_bid ({}) must be below maximum_ask ({})",
                self.minimum_bid, self.maximum_ask
            )));
        }
        Ok(())
    }
}

fn default_lot_size() -> u64 {
    10
}
fn default_position_limit() -> i64 {
    100
}
fn default_tick_size() -> u64 {
    100 // 1.00 in cents
}
fn default_minimum_bid() -> u64 {
    MINIMUM_BID
}
fn default_maximum_ask() -> u64 {
    MAXIMUM_ASK
}
