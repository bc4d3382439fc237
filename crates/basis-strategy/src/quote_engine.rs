//! Quote decision engine.
//!
//! Pure function of the reference book, the ETF top of book, `mu` and the
//! current position. Branches are evaluated in priority order and at most
//! one fires per snapshot:
//!
//! | Branch | Condition                               | Order                     |
//! |--------|-----------------------------------------|---------------------------|
//! | A      | `ref_bid - etf_ask > delta`             | bid at `etf_ask`          |
//! | B      | `etf_bid - ref_ask > delta`             | ask at `etf_bid`          |
//! | C      | `ref_bid - etf_bid > delta - tick`      | bid at `etf_bid + tick`   |
//! | D      | `etf_ask - ref_ask > delta - tick`      | ask at `etf_ask - tick`   |
//!
//! with `delta = gamma + tick + mu`. Bids are sized to `limit - position`,
//! asks to `limit + position`, both clamped at zero. Cancelling the resting quotes is the
//! caller's job and happens unconditionally before this runs.

use basis_core::{Price, Side, Volume};
use rust_decimal::Decimal;

use crate::config::StrategyConfig;

/// Which branch produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteBranch {
    /// Lift the ETF ask: reference bid is through it.
    TakeAsk,
    /// Hit the ETF bid: it is through the reference ask.
    HitBid,
    /// Join one tick above the ETF bid.
    ImproveBid,
    /// Join one tick below the ETF ask.
    ImproveAsk,
}

impl QuoteBranch {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            QuoteBranch::TakeAsk => "take_ask",
            QuoteBranch::HitBid => "hit_bid",
            QuoteBranch::ImproveBid => "improve_bid",
            QuoteBranch::ImproveAsk => "improve_ask",
        }
    }

    pub fn side(&self) -> Side {
        match self {
            QuoteBranch::TakeAsk | QuoteBranch::ImproveBid => Side::Buy,
            QuoteBranch::HitBid | QuoteBranch::ImproveAsk => Side::Sell,
        }
    }
}

/// Market state the decision is made from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteInputs {
    pub reference_bid: Price,
    pub reference_ask: Price,
    pub etf_bid: Price,
    pub etf_ask: Price,
    pub mu: Decimal,
    pub position: i64,
}

/// A quote to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteDecision {
    pub branch: QuoteBranch,
    pub side: Side,
    pub price: Price,
    pub volume: Volume,
}

/// Edge the cross-market spread must exceed: `gamma + tick + mu`.
///
/// No floor is applied; a negative `mu` or `gamma` passes through.
pub fn edge_threshold(mu: Decimal, config: &StrategyConfig) -> Decimal {
    config.gamma + config.tick_decimal() + mu
}

/// Headroom to the long limit.
fn bid_volume(position: i64, config: &StrategyConfig) -> Volume {
    to_volume(config.position_limit.saturating_sub(position))
}

/// Headroom to the short limit.
fn ask_volume(position: i64, config: &StrategyConfig) -> Volume {
    to_volume(config.position_limit.saturating_add(position))
}

fn to_volume(lots: i64) -> Volume {
    Volume::new(u64::try_from(lots).unwrap_or(0))
}

fn spread(a: Price, b: Price) -> Decimal {
    a.to_decimal() - b.to_decimal()
}

/// Decide the single quote, if any, for this snapshot.
///
/// Returns `None` when no branch fires, or when the firing branch has no
/// headroom left on its side (zero volume). A zero-volume branch does not
/// fall through to a lower-priority one.
pub fn decide_quote(inputs: &QuoteInputs, config: &StrategyConfig) -> Option<QuoteDecision> {
    let tick = config.tick_decimal();
    let delta = edge_threshold(inputs.mu, config);

    let (branch, price) = if spread(inputs.reference_bid, inputs.etf_ask) > delta {
        (QuoteBranch::TakeAsk, inputs.etf_ask)
    } else if spread(inputs.etf_bid, inputs.reference_ask) > delta {
        (QuoteBranch::HitBid, inputs.etf_bid)
    } else if spread(inputs.reference_bid, inputs.etf_bid) > delta - tick {
        (
            QuoteBranch::ImproveBid,
            inputs.etf_bid.plus_ticks(1, config.tick_size),
        )
    } else if spread(inputs.etf_ask, inputs.reference_ask) > delta - tick {
        (
            QuoteBranch::ImproveAsk,
            inputs.etf_ask.minus_ticks(1, config.tick_size),
        )
    } else {
        return None;
    };

    let side = branch.side();
    let volume = match side {
        Side::Buy => bid_volume(inputs.position, config),
        Side::Sell => ask_volume(inputs.position, config),
    };
    if volume.is_zero() {
        return None;
    }

    Some(QuoteDecision {
        branch,
        side,
        price,
        volume,
    })
}
