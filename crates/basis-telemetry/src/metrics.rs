//! Prometheus metrics for the basis bot.
//!
//! Covers:
//! - Inbound venue events
//! - Quote inserts and cancels
//! - Fills, hedges and hedge fills
//! - Position and fair-value offset gauges
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. A registration failure
//! means duplicate metric names, a programming error that should crash at
//! startup. These panics only occur during static initialization.

use basis_core::Side;
use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_int_gauge, Counter,
    CounterVec, Encoder, Gauge, IntGauge, TextEncoder,
};

use crate::error::TelemetryResult;

/// Inbound venue events by kind.
pub static EVENTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "basis_events_total",
        "Total venue events processed",
        &["kind"]
    )
    .unwrap()
});

/// Quote orders inserted by side.
pub static ORDERS_INSERTED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "basis_orders_inserted_total",
        "Total quote orders inserted",
        &["side", "branch"]
    )
    .unwrap()
});

/// Cancel requests sent.
pub static ORDERS_CANCELLED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "basis_orders_cancelled_total",
        "Total cancel requests sent",
        &["side"]
    )
    .unwrap()
});

/// Filled lots on quote orders by side.
pub static FILLED_LOTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "basis_filled_lots_total",
        "Total lots filled on quote orders",
        &["side"]
    )
    .unwrap()
});

/// Hedge orders sent by side.
pub static HEDGES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "basis_hedges_total",
        "Total hedge orders sent",
        &["side"]
    )
    .unwrap()
});

/// Lots filled on hedge orders.
pub static HEDGE_FILLED_LOTS_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "basis_hedge_filled_lots_total",
        "Total lots filled on hedge orders"
    )
    .unwrap()
});

/// Venue errors by kind (order / global).
pub static VENUE_ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "basis_venue_errors_total",
        "Total venue error messages",
        &["kind"]
    )
    .unwrap()
});

/// Net position in lots.
pub static POSITION_LOTS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("basis_position_lots", "Net ETF position in lots").unwrap()
});

/// Current fair-value offset estimate.
pub static MU: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!("basis_mu", "Fair-value offset estimate (mu)").unwrap()
});

/// Crossings recorded by the mu estimator.
pub static CROSSINGS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("basis_crossings", "Crossing events recorded").unwrap()
});

/// Orders in the live registry.
pub static LIVE_ORDERS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("basis_live_orders", "Quote orders tracked as live").unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    /// Record an inbound venue event.
    pub fn event_received(kind: &str) {
        EVENTS_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record a quote insert.
    pub fn order_inserted(side: Side, branch: &str) {
        ORDERS_INSERTED_TOTAL
            .with_label_values(&[&side.to_string(), branch])
            .inc();
    }

    /// Record a cancel request.
    pub fn order_cancelled(side: Side) {
        ORDERS_CANCELLED_TOTAL
            .with_label_values(&[&side.to_string()])
            .inc();
    }

    /// Record a quote fill.
    pub fn order_filled(side: Side, lots: u64) {
        FILLED_LOTS_TOTAL
            .with_label_values(&[&side.to_string()])
            .inc_by(lots as f64);
    }

    /// Record a hedge order.
    pub fn hedge_sent(side: Side) {
        HEDGES_TOTAL.with_label_values(&[&side.to_string()]).inc();
    }

    /// Record a hedge fill.
    pub fn hedge_filled(lots: u64) {
        HEDGE_FILLED_LOTS_TOTAL.inc_by(lots as f64);
    }

    /// Record a venue error.
    pub fn venue_error(kind: &str) {
        VENUE_ERRORS_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Set the position gauge.
    pub fn set_position(lots: i64) {
        POSITION_LOTS.set(lots);
    }

    /// Set the estimator gauges.
    pub fn set_fair_value(mu: f64, crossings: u64) {
        MU.set(mu);
        CROSSINGS.set(i64::try_from(crossings).unwrap_or(i64::MAX));
    }

    /// Set the live order gauge.
    pub fn set_live_orders(count: usize) {
        LIVE_ORDERS.set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Render all registered metrics in the text exposition format.
    pub fn gather_text() -> TelemetryResult<String> {
        let encoder = TextEncoder::new();
        let families = prometheus::gather();
        let mut buf = Vec::new();
        encoder.encode(&families, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let before = ORDERS_INSERTED_TOTAL
            .with_label_values(&["buy", "take"])
            .get();
        Metrics::order_inserted(Side::Buy, "take");
        Metrics::order_inserted(Side::Buy, "take");
        let after = ORDERS_INSERTED_TOTAL
            .with_label_values(&["buy", "take"])
            .get();
        assert!((after - before - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gauges_set() {
        Metrics::set_position(-30);
        assert_eq!(POSITION_LOTS.get(), -30);
        Metrics::set_fair_value(1.5, 4);
        assert!((MU.get() - 1.5).abs() < f64::EPSILON);
        assert_eq!(CROSSINGS.get(), 4);
    }

    #[test]
    fn test_gather_text_contains_metric_names() {
        Metrics::hedge_sent(Side::Sell);
        let text = Metrics::gather_text().unwrap();
        assert!(text.contains("basis_hedges_total"));
    }
}
