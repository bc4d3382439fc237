//! Event-driven strategy driver.
//!
//! `AutoTrader` owns the whole strategy state and exposes one handler per
//! venue event. Handlers mutate state optimistically and return the actions
//! to send; nothing here waits on the venue.

use basis_core::{BookSnapshot, Instrument, Lifespan, OrderId, Price, Side, VenueAction, Volume};
use basis_feed::VenueEvent;
use basis_telemetry::Metrics;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::StrategyConfig;
use crate::fair_value::FairValueEstimator;
use crate::hedger::Hedger;
use crate::order_tracker::{OrderIdGenerator, OrderTracker, StatusOutcome, TrackedOrder};
use crate::quote_engine::{decide_quote, QuoteInputs};
use crate::reference::ReferencePriceTracker;

/// Mutable state of one trading session.
#[derive(Debug, Default)]
pub struct StrategyState {
    /// Net ETF position in lots.
    pub position: i64,
    pub orders: OrderTracker,
    pub reference: ReferencePriceTracker,
    pub fair_value: FairValueEstimator,
    pub ids: OrderIdGenerator,
}

/// End-of-session figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub position: i64,
    pub mu: Decimal,
    pub crossing_count: u64,
    pub live_orders: usize,
    pub events_processed: u64,
    pub orders_inserted: u64,
    pub orders_cancelled: u64,
    pub fills: u64,
    pub hedges_sent: u64,
}

/// The basis quoting strategy.
#[derive(Debug)]
pub struct AutoTrader {
    config: StrategyConfig,
    state: StrategyState,
    hedger: Hedger,
    events_processed: u64,
    orders_inserted: u64,
    orders_cancelled: u64,
    fills: u64,
}

impl AutoTrader {
    pub fn new(config: StrategyConfig) -> Self {
        let hedger = Hedger::new(&config);
        Self {
            config,
            state: StrategyState::default(),
            hedger,
            events_processed: 0,
            orders_inserted: 0,
            orders_cancelled: 0,
            fills: 0,
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn state(&self) -> &StrategyState {
        &self.state
    }

    pub fn position(&self) -> i64 {
        self.state.position
    }

    pub fn mu(&self) -> Decimal {
        self.state.fair_value.mu()
    }

    /// Dispatch one venue event.
    pub fn on_event(&mut self, event: &VenueEvent) -> Vec<VenueAction> {
        self.events_processed += 1;
        Metrics::event_received(event.kind());

        match event {
            VenueEvent::OrderBookUpdate {
                instrument,
                sequence_number,
                book,
            } => self.on_order_book_update(*instrument, *sequence_number, book),
            VenueEvent::TradeTicks {
                instrument,
                sequence_number,
                book,
            } => self.on_trade_ticks(*instrument, *sequence_number, book),
            VenueEvent::OrderFilled { id, price, volume } => {
                self.on_order_filled(*id, *price, *volume)
            }
            VenueEvent::OrderStatus {
                id,
                filled_volume,
                remaining_volume,
                fees,
            } => self.on_order_status(*id, *filled_volume, *remaining_volume, *fees),
            VenueEvent::HedgeFilled { id, price, volume } => {
                self.on_hedge_filled(*id, *price, *volume)
            }
            VenueEvent::Error { id, message } => self.on_error(*id, message),
            VenueEvent::Disconnected => self.on_disconnect(),
        }
    }

    /// Book snapshot for either instrument.
    ///
    /// Future snapshots only refresh the reference prices. A two-sided ETF
    /// snapshot, once a reference exists, runs one full quoting cycle:
    /// seed mu, cancel both resting quotes, place at most one new quote,
    /// then check for a crossing.
    pub fn on_order_book_update(
        &mut self,
        instrument: Instrument,
        sequence_number: u64,
        book: &BookSnapshot,
    ) -> Vec<VenueAction> {
        match instrument {
            Instrument::Future => {
                self.state.reference.on_snapshot(book);
                trace!(sequence_number, bid = %book.best_bid(), ask = %book.best_ask(), "Reference book updated");
                Vec::new()
            }
            Instrument::Etf => self.on_etf_book(sequence_number, book),
        }
    }

    fn on_etf_book(&mut self, sequence_number: u64, book: &BookSnapshot) -> Vec<VenueAction> {
        if !book.is_two_sided() {
            debug!(sequence_number, "One-sided ETF book, skipping");
            return Vec::new();
        }
        if !self.state.reference.has_snapshot() {
            debug!(sequence_number, "No reference book yet, skipping");
            return Vec::new();
        }

        let etf_bid = book.best_bid();
        let etf_ask = book.best_ask();
        let etf_mid = book.mid_price();
        self.state.fair_value.seed(etf_mid, etf_bid.to_decimal());

        let mut actions = Vec::new();
        self.cancel_active_quotes(&mut actions);

        let inputs = QuoteInputs {
            reference_bid: self.state.reference.best_bid(),
            reference_ask: self.state.reference.best_ask(),
            etf_bid,
            etf_ask,
            mu: self.state.fair_value.mu(),
            position: self.state.position,
        };

        match decide_quote(&inputs, &self.config) {
            Some(decision) => {
                let id = self.state.ids.next_id();
                self.state.orders.register(TrackedOrder::pending(
                    id,
                    decision.side,
                    decision.price,
                    decision.volume,
                ));
                self.orders_inserted += 1;
                Metrics::order_inserted(decision.side, decision.branch.label());

                info!(
                    order_id = %id,
                    side = %decision.side,
                    price = %decision.price,
                    volume = %decision.volume,
                    whole_lots = decision.volume.whole_lots(self.config.lot_size),
                    branch = decision.branch.label(),
                    "Placing quote"
                );

                actions.push(VenueAction::InsertOrder {
                    id,
                    side: decision.side,
                    price: decision.price,
                    volume: decision.volume,
                    lifespan: Lifespan::GoodForDay,
                });
            }
            None => {
                debug!(
                    sequence_number,
                    etf_bid = %etf_bid,
                    etf_ask = %etf_ask,
                    reference_bid = %inputs.reference_bid,
                    reference_ask = %inputs.reference_ask,
                    mu = %inputs.mu,
                    "No quote"
                );
            }
        }

        let crossed = self.state.fair_value.observe(
            etf_mid,
            self.state.reference.mid_price(),
            etf_bid.to_decimal(),
            self.state.position,
        );
        if crossed {
            info!(
                mu = %self.state.fair_value.mu(),
                crossings = self.state.fair_value.crossing_count(),
                position = self.state.position,
                "Crossing recorded"
            );
        }

        Metrics::set_fair_value(
            self.state.fair_value.mu().to_f64().unwrap_or(0.0),
            self.state.fair_value.crossing_count(),
        );
        Metrics::set_live_orders(self.state.orders.len());

        actions
    }

    /// Cancel both resting quotes and clear them without waiting for
    /// confirmation. The registry keeps them until their terminal status.
    fn cancel_active_quotes(&mut self, actions: &mut Vec<VenueAction>) {
        for side in [Side::Buy, Side::Sell] {
            if let Some(id) = self.state.orders.take_active(side) {
                debug!(order_id = %id, side = %side, "Cancelling quote");
                self.orders_cancelled += 1;
                Metrics::order_cancelled(side);
                actions.push(VenueAction::CancelOrder { id });
            }
        }
    }

    /// Trade ticks carry no signal for this strategy.
    pub fn on_trade_ticks(
        &mut self,
        instrument: Instrument,
        sequence_number: u64,
        _book: &BookSnapshot,
    ) -> Vec<VenueAction> {
        trace!(instrument = %instrument, sequence_number, "Trade ticks ignored");
        Vec::new()
    }

    /// Fill on one of our quotes: move the position and hedge at once.
    pub fn on_order_filled(&mut self, id: OrderId, price: Price, volume: Volume) -> Vec<VenueAction> {
        let Some(side) = self.state.orders.side_of(id) else {
            debug!(order_id = %id, "Fill for untracked order ignored");
            return Vec::new();
        };

        self.state.orders.record_fill(id, volume);
        self.state.position = self
            .state
            .position
            .saturating_add(side.sign() * volume.as_signed());
        self.fills += 1;

        if self.state.position.unsigned_abs() > self.config.position_limit.unsigned_abs() {
            warn!(
                order_id = %id,
                position = self.state.position,
                limit = self.config.position_limit,
                "Position limit breached"
            );
        }

        let hedge = self.hedger.hedge_for_fill(side, volume);
        let hedge_id = self.state.ids.next_id();

        info!(
            order_id = %id,
            side = %side,
            price = %price,
            volume = %volume,
            position = self.state.position,
            hedge_id = %hedge_id,
            "Quote filled, hedging"
        );

        Metrics::order_filled(side, volume.inner());
        Metrics::hedge_sent(hedge.side);
        Metrics::set_position(self.state.position);

        vec![VenueAction::HedgeOrder {
            id: hedge_id,
            side: hedge.side,
            price: hedge.price,
            volume: hedge.volume,
        }]
    }

    /// Status update; zero remaining volume retires the order.
    pub fn on_order_status(
        &mut self,
        id: OrderId,
        filled_volume: Volume,
        remaining_volume: Volume,
        fees: i64,
    ) -> Vec<VenueAction> {
        match self.state.orders.on_status(id, filled_volume, remaining_volume) {
            StatusOutcome::Retired { side } => {
                debug!(order_id = %id, side = %side, filled = %filled_volume, fees, "Order done");
            }
            StatusOutcome::Updated { lifecycle } => {
                trace!(order_id = %id, ?lifecycle, remaining = %remaining_volume, fees, "Order updated");
            }
            StatusOutcome::Unknown => {
                trace!(order_id = %id, "Status for untracked order");
            }
        }
        Metrics::set_live_orders(self.state.orders.len());
        Vec::new()
    }

    /// Hedge fills are informational.
    pub fn on_hedge_filled(&mut self, id: OrderId, price: Price, volume: Volume) -> Vec<VenueAction> {
        self.hedger.on_hedge_filled(volume);
        Metrics::hedge_filled(volume.inner());
        info!(hedge_id = %id, price = %price, volume = %volume, "Hedge filled");
        Vec::new()
    }

    /// Venue error. One naming a tracked order retires it; anything else is
    /// only logged.
    pub fn on_error(&mut self, id: OrderId, message: &str) -> Vec<VenueAction> {
        if !id.is_none() && self.state.orders.contains(id) {
            warn!(order_id = %id, error = message, "Order rejected");
            Metrics::venue_error("order");
            return self.on_order_status(id, Volume::ZERO, Volume::ZERO, 0);
        }

        warn!(order_id = %id, error = message, "Venue error");
        Metrics::venue_error("global");
        Vec::new()
    }

    /// Session loss. State is kept as is.
    pub fn on_disconnect(&mut self) -> Vec<VenueAction> {
        warn!(
            position = self.state.position,
            live_orders = self.state.orders.len(),
            "Venue disconnected"
        );
        Vec::new()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            position: self.state.position,
            mu: self.state.fair_value.mu(),
            crossing_count: self.state.fair_value.crossing_count(),
            live_orders: self.state.orders.len(),
            events_processed: self.events_processed,
            orders_inserted: self.orders_inserted,
            orders_cancelled: self.orders_cancelled,
            fills: self.fills,
            hedges_sent: self.hedger.hedges_sent(),
        }
    }
}
