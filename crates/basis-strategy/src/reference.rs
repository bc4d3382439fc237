//! Reference (future) price tracking.

use basis_core::{BookSnapshot, Price};
use rust_decimal::Decimal;

/// Latest best bid/ask of the reference instrument.
///
/// Last write wins; staleness is not checked. Prices read as zero until the
/// first snapshot arrives.
#[derive(Debug, Clone, Default)]
pub struct ReferencePriceTracker {
    best_bid: Price,
    best_ask: Price,
    updates: u64,
}

impl ReferencePriceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the cached prices with the snapshot's best level.
    pub fn on_snapshot(&mut self, book: &BookSnapshot) {
        self.best_bid = book.best_bid();
        self.best_ask = book.best_ask();
        self.updates += 1;
    }

    pub fn best_bid(&self) -> Price {
        self.best_bid
    }

    pub fn best_ask(&self) -> Price {
        self.best_ask
    }

    pub fn mid_price(&self) -> Decimal {
        (self.best_bid.to_decimal() + self.best_ask.to_decimal()) / Decimal::TWO
    }

    /// Whether any reference snapshot has been seen.
    pub fn has_snapshot(&self) -> bool {
        self.updates > 0
    }

    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unset_until_first_snapshot() {
        let tracker = ReferencePriceTracker::new();
        assert!(!tracker.has_snapshot());
        assert_eq!(tracker.best_bid(), Price::ZERO);
        assert_eq!(tracker.best_ask(), Price::ZERO);
    }

    #[test]
    fn test_last_write_wins() {
        let mut tracker = ReferencePriceTracker::new();
        tracker.on_snapshot(&BookSnapshot::top(100, 1, 102, 1));
        tracker.on_snapshot(&BookSnapshot::top(300, 1, 302, 1));

        assert!(tracker.has_snapshot());
        assert_eq!(tracker.update_count(), 2);
        assert_eq!(tracker.best_bid(), Price::new(300));
        assert_eq!(tracker.best_ask(), Price::new(302));
        assert_eq!(tracker.mid_price(), dec!(301));
    }

    #[test]
    fn test_one_sided_snapshot_is_stored_verbatim() {
        let mut tracker = ReferencePriceTracker::new();
        tracker.on_snapshot(&BookSnapshot::top(0, 0, 102, 1));
        assert_eq!(tracker.best_bid(), Price::ZERO);
        assert_eq!(tracker.best_ask(), Price::new(102));
    }
}
