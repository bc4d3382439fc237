//! Inbound venue events.

use basis_core::{BookSnapshot, Instrument, OrderId, Price, Volume};

/// A push notification from the exchange connectivity layer.
///
/// Events for one instrument arrive in sequence-number order; the number is
/// carried for diagnostics and is not checked for gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueEvent {
    /// Periodic top-of-book snapshot.
    OrderBookUpdate {
        instrument: Instrument,
        sequence_number: u64,
        book: BookSnapshot,
    },
    /// Prices and aggregated volumes that traded since the last tick.
    TradeTicks {
        instrument: Instrument,
        sequence_number: u64,
        book: BookSnapshot,
    },
    /// One of our resting orders was (partially) filled.
    OrderFilled {
        id: OrderId,
        price: Price,
        volume: Volume,
    },
    /// Status change of one of our resting orders. A remaining volume of
    /// zero means the order is done (filled or cancelled).
    OrderStatus {
        id: OrderId,
        filled_volume: Volume,
        remaining_volume: Volume,
        fees: i64,
    },
    /// One of our hedge orders was (partially) filled.
    HedgeFilled {
        id: OrderId,
        price: Price,
        volume: Volume,
    },
    /// Venue-side error. `id` is zero when the error is not order specific.
    Error { id: OrderId, message: String },
    /// The venue session went away.
    Disconnected,
}

impl VenueEvent {
    /// Short label, used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderBookUpdate { .. } => "order_book_update",
            Self::TradeTicks { .. } => "trade_ticks",
            Self::OrderFilled { .. } => "order_filled",
            Self::OrderStatus { .. } => "order_status",
            Self::HedgeFilled { .. } => "hedge_filled",
            Self::Error { .. } => "error",
            Self::Disconnected => "disconnected",
        }
    }

    /// Shorthand for a book update carrying only the best level.
    pub fn top_of_book(instrument: Instrument, sequence_number: u64, bid: u64, ask: u64) -> Self {
        Self::OrderBookUpdate {
            instrument,
            sequence_number,
            book: BookSnapshot::top(bid, 1, ask, 1),
        }
    }
}
