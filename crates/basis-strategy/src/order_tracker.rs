//! Live order registry.
//!
//! Tracks every quote order the venue may still hold, keyed by id with its
//! side, plus the single active bid and ask. Orders leave the registry only
//! on terminal status (remaining volume zero), so a cancelled quote stays
//! tracked until the venue confirms it: fills that race the cancel are still
//! attributed to the right side.
//!
//! Hedge orders are never registered here.

use std::collections::HashMap;

use basis_core::{OrderId, Price, Side, Volume};
use tracing::debug;

/// Lifecycle of a tracked order. Terminal orders are dropped, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderLifecycle {
    /// Sent, not yet acknowledged.
    #[default]
    Pending,
    /// Acknowledged and resting with nothing filled.
    Live,
    /// Resting with part of its volume filled.
    PartiallyFilled,
}

/// A quote order the venue may still hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedOrder {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    pub volume: Volume,
    /// Lots filled so far.
    pub filled: Volume,
    pub lifecycle: OrderLifecycle,
}

impl TrackedOrder {
    /// A freshly sent order.
    pub fn pending(id: OrderId, side: Side, price: Price, volume: Volume) -> Self {
        Self {
            id,
            side,
            price,
            volume,
            filled: Volume::ZERO,
            lifecycle: OrderLifecycle::Pending,
        }
    }
}

/// Result of applying a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// Order reached a terminal state and was removed.
    Retired { side: Side },
    /// Order is still resting; lifecycle updated.
    Updated { lifecycle: OrderLifecycle },
    /// Id not tracked (already retired, a hedge, or never ours).
    Unknown,
}

/// Registry of live quote orders.
#[derive(Debug, Default)]
pub struct OrderTracker {
    orders: HashMap<OrderId, TrackedOrder>,
    active_bid: Option<OrderId>,
    active_ask: Option<OrderId>,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly sent order and make it the active quote for its side.
    pub fn register(&mut self, order: TrackedOrder) {
        match order.side {
            Side::Buy => self.active_bid = Some(order.id),
            Side::Sell => self.active_ask = Some(order.id),
        }
        self.orders.insert(order.id, order);
    }

    /// Active quote on a side.
    pub fn active(&self, side: Side) -> Option<OrderId> {
        match side {
            Side::Buy => self.active_bid,
            Side::Sell => self.active_ask,
        }
    }

    /// Clear and return the active quote on a side.
    ///
    /// The order stays in the registry until its terminal status arrives.
    pub fn take_active(&mut self, side: Side) -> Option<OrderId> {
        match side {
            Side::Buy => self.active_bid.take(),
            Side::Sell => self.active_ask.take(),
        }
    }

    pub fn get(&self, id: OrderId) -> Option<&TrackedOrder> {
        self.orders.get(&id)
    }

    pub fn side_of(&self, id: OrderId) -> Option<Side> {
        self.orders.get(&id).map(|o| o.side)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
    }

    pub fn is_live_bid(&self, id: OrderId) -> bool {
        self.side_of(id) == Some(Side::Buy)
    }

    pub fn is_live_ask(&self, id: OrderId) -> bool {
        self.side_of(id) == Some(Side::Sell)
    }

    /// Add a fill to a tracked order.
    pub fn record_fill(&mut self, id: OrderId, volume: Volume) {
        if let Some(order) = self.orders.get_mut(&id) {
            order.filled = order.filled + volume;
            order.lifecycle = OrderLifecycle::PartiallyFilled;
        }
    }

    /// Apply a venue status update.
    ///
    /// Zero remaining volume retires the order: an active id equal to it is
    /// cleared and the registry entry removed. Unknown ids are a no-op.
    pub fn on_status(
        &mut self,
        id: OrderId,
        filled_volume: Volume,
        remaining_volume: Volume,
    ) -> StatusOutcome {
        if remaining_volume.is_zero() {
            if self.active_bid == Some(id) {
                self.active_bid = None;
            } else if self.active_ask == Some(id) {
                self.active_ask = None;
            }

            return match self.orders.remove(&id) {
                Some(order) => {
                    debug!(order_id = %id, side = %order.side, filled = %filled_volume, "Order retired");
                    StatusOutcome::Retired { side: order.side }
                }
                None => StatusOutcome::Unknown,
            };
        }

        match self.orders.get_mut(&id) {
            Some(order) => {
                order.filled = filled_volume;
                order.lifecycle = if filled_volume.is_zero() {
                    OrderLifecycle::Live
                } else {
                    OrderLifecycle::PartiallyFilled
                };
                StatusOutcome::Updated {
                    lifecycle: order.lifecycle,
                }
            }
            None => StatusOutcome::Unknown,
        }
    }

    /// Number of tracked orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of tracked orders on a side.
    pub fn count(&self, side: Side) -> usize {
        self.orders.values().filter(|o| o.side == side).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedOrder> {
        self.orders.values()
    }
}

/// Session-wide order id source.
///
/// Starts at 1 and never repeats; quotes and hedges draw from the same
/// sequence.
#[derive(Debug)]
pub struct OrderIdGenerator {
    next: u64,
}

impl OrderIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Draw the next id.
    pub fn next_id(&mut self) -> OrderId {
        let id = OrderId::new(self.next);
        self.next += 1;
        id
    }

    /// The id the next draw will return.
    pub fn peek(&self) -> OrderId {
        OrderId::new(self.next)
    }
}

impl Default for OrderIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid(id: u64) -> TrackedOrder {
        TrackedOrder::pending(OrderId::new(id), Side::Buy, Price::new(102), Volume::new(10))
    }

    fn ask(id: u64) -> TrackedOrder {
        TrackedOrder::pending(OrderId::new(id), Side::Sell, Price::new(100), Volume::new(10))
    }

    #[test]
    fn test_register_sets_active() {
        let mut tracker = OrderTracker::new();
        tracker.register(bid(1));
        tracker.register(ask(2));

        assert_eq!(tracker.active(Side::Buy), Some(OrderId::new(1)));
        assert_eq!(tracker.active(Side::Sell), Some(OrderId::new(2)));
        assert!(tracker.is_live_bid(OrderId::new(1)));
        assert!(tracker.is_live_ask(OrderId::new(2)));
        assert!(!tracker.is_live_ask(OrderId::new(1)));
        assert_eq!(tracker.get(OrderId::new(1)).unwrap().lifecycle, OrderLifecycle::Pending);
    }

    #[test]
    fn test_take_active_keeps_registry_entry() {
        let mut tracker = OrderTracker::new();
        tracker.register(bid(1));

        assert_eq!(tracker.take_active(Side::Buy), Some(OrderId::new(1)));
        assert_eq!(tracker.active(Side::Buy), None);
        assert_eq!(tracker.take_active(Side::Buy), None);
        assert!(tracker.is_live_bid(OrderId::new(1)));
    }

    #[test]
    fn test_terminal_status_retires_order() {
        let mut tracker = OrderTracker::new();
        tracker.register(bid(5));

        let outcome = tracker.on_status(OrderId::new(5), Volume::new(10), Volume::ZERO);
        assert_eq!(outcome, StatusOutcome::Retired { side: Side::Buy });
        assert_eq!(tracker.active(Side::Buy), None);
        assert!(!tracker.contains(OrderId::new(5)));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_terminal_status_for_inactive_order_keeps_new_active() {
        let mut tracker = OrderTracker::new();
        tracker.register(bid(1));
        tracker.take_active(Side::Buy);
        tracker.register(bid(2));

        // Cancel confirmation for the replaced quote
        tracker.on_status(OrderId::new(1), Volume::ZERO, Volume::ZERO);
        assert_eq!(tracker.active(Side::Buy), Some(OrderId::new(2)));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_unknown_terminal_status_is_noop() {
        let mut tracker = OrderTracker::new();
        tracker.register(ask(3));

        let outcome = tracker.on_status(OrderId::new(99), Volume::ZERO, Volume::ZERO);
        assert_eq!(outcome, StatusOutcome::Unknown);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.active(Side::Sell), Some(OrderId::new(3)));
    }

    #[test]
    fn test_partial_status_updates_lifecycle() {
        let mut tracker = OrderTracker::new();
        tracker.register(bid(4));

        let acked = tracker.on_status(OrderId::new(4), Volume::ZERO, Volume::new(10));
        assert_eq!(
            acked,
            StatusOutcome::Updated {
                lifecycle: OrderLifecycle::Live
            }
        );

        let partial = tracker.on_status(OrderId::new(4), Volume::new(3), Volume::new(7));
        assert_eq!(
            partial,
            StatusOutcome::Updated {
                lifecycle: OrderLifecycle::PartiallyFilled
            }
        );
        assert_eq!(tracker.get(OrderId::new(4)).unwrap().filled, Volume::new(3));
        assert_eq!(tracker.active(Side::Buy), Some(OrderId::new(4)));
    }

    #[test]
    fn test_record_fill_accumulates() {
        let mut tracker = OrderTracker::new();
        tracker.register(ask(6));
        tracker.record_fill(OrderId::new(6), Volume::new(2));
        tracker.record_fill(OrderId::new(6), Volume::new(3));

        let order = tracker.get(OrderId::new(6)).unwrap();
        assert_eq!(order.filled, Volume::new(5));
        assert_eq!(order.lifecycle, OrderLifecycle::PartiallyFilled);

        // Unknown ids are ignored
        tracker.record_fill(OrderId::new(60), Volume::new(1));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_count_by_side() {
        let mut tracker = OrderTracker::new();
        tracker.register(bid(1));
        tracker.register(bid(2));
        tracker.register(ask(3));
        assert_eq!(tracker.count(Side::Buy), 2);
        assert_eq!(tracker.count(Side::Sell), 1);
        assert_eq!(tracker.iter().count(), 3);
    }

    #[test]
    fn test_id_generator_monotonic() {
        let mut ids = OrderIdGenerator::new();
        assert_eq!(ids.peek(), OrderId::new(1));
        assert_eq!(ids.next_id(), OrderId::new(1));
        assert_eq!(ids.next_id(), OrderId::new(2));
        assert_eq!(ids.peek(), OrderId::new(3));
    }
}
