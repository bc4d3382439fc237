//! Future/ETF basis quoting strategy.
//!
//! Turns venue events into order-management actions:
//! - Reference price tracking for the future
//! - Running fair-value offset estimate ("mu")
//! - Quote decisions against the ETF book (cancel, then at most one new order)
//! - Live order registry with optimistic cancel bookkeeping
//! - Immediate hedging of every quote fill on the future
//!
//! # Architecture
//!
//! ```text
//! OrderBookUpdate(future) → ReferencePriceTracker
//! OrderBookUpdate(etf)    → AutoTrader.on_order_book_update()
//!                            ├─ FairValueEstimator: seed mu
//!                            ├─ OrderTracker: cancel active bid/ask
//!                            ├─ decide_quote(): branch A/B/C/D
//!                            └─ FairValueEstimator: crossing check
//! OrderFilled             → position += ±volume, Hedger → HedgeOrder
//! OrderStatus / Error     → OrderTracker: retire terminal orders
//! ```
//!
//! Every handler takes `&mut self` and returns the `VenueAction`s to send;
//! the caller runs handlers one event at a time.

pub mod autotrader;
pub mod config;
pub mod fair_value;
pub mod hedger;
pub mod order_tracker;
pub mod quote_engine;
pub mod reference;

pub use autotrader::{AutoTrader, SessionSummary, StrategyState};
pub use config::StrategyConfig;
pub use fair_value::FairValueEstimator;
pub use hedger::{HedgeInstruction, Hedger};
pub use order_tracker::{OrderIdGenerator, OrderLifecycle, OrderTracker, StatusOutcome, TrackedOrder};
pub use quote_engine::{decide_quote, edge_threshold, QuoteBranch, QuoteDecision, QuoteInputs};
pub use reference::ReferencePriceTracker;
