//! Hedging of quote fills on the future.
//!
//! Every fill on a quote order is offset immediately with a marketable order
//! on the opposite side, priced at the venue's price bounds so it always
//! crosses. Hedge orders are fire-and-forget: they are not tracked and their
//! fills never trigger further hedging.

use basis_core::{Price, Side, Volume};
use tracing::debug;

use crate::config::StrategyConfig;

/// A hedge order to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HedgeInstruction {
    pub side: Side,
    pub price: Price,
    pub volume: Volume,
}

/// Hedge pricing and bookkeeping.
#[derive(Debug, Clone)]
pub struct Hedger {
    sell_price: Price,
    buy_price: Price,
    hedges_sent: u64,
    hedged_lots: u64,
    hedge_filled_lots: u64,
}

impl Hedger {
    pub fn new(config: &StrategyConfig) -> Self {
        Self {
            sell_price: config.min_bid_nearest_tick(),
            buy_price: config.max_ask_nearest_tick(),
            hedges_sent: 0,
            hedged_lots: 0,
            hedge_filled_lots: 0,
        }
    }

    /// Hedge for a fill on a quote of `quote_side`.
    ///
    /// A filled bid is hedged with a sell at the floor price, a filled ask
    /// with a buy at the ceiling price.
    pub fn hedge_for_fill(&mut self, quote_side: Side, volume: Volume) -> HedgeInstruction {
        let side = quote_side.opposite();
        let price = self.price_for(side);
        self.hedges_sent += 1;
        self.hedged_lots = self.hedged_lots.saturating_add(volume.inner());

        debug!(quote_side = %quote_side, hedge_side = %side, price = %price, volume = %volume, "Hedge sized");

        HedgeInstruction {
            side,
            price,
            volume,
        }
    }

    /// Pinned limit price for a hedge on `side`.
    pub fn price_for(&self, side: Side) -> Price {
        match side {
            Side::Sell => self.sell_price,
            Side::Buy => self.buy_price,
        }
    }

    /// Account a hedge fill. Informational only.
    pub fn on_hedge_filled(&mut self, volume: Volume) {
        self.hedge_filled_lots = self.hedge_filled_lots.saturating_add(volume.inner());
    }

    pub fn hedges_sent(&self) -> u64 {
        self.hedges_sent
    }

    pub fn hedged_lots(&self) -> u64 {
        self.hedged_lots
    }

    pub fn hedge_filled_lots(&self) -> u64 {
        self.hedge_filled_lots
    }
}
