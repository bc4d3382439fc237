//! JSON-lines event parsing.
//!
//! Each line holds one event object tagged by `"type"`:
//!
//! ```text
//! {"type":"order_book_update","instrument":"future","sequence_number":1,
//!  "ask_prices":[10200],"ask_volumes":[5],"bid_prices":[10000],"bid_volumes":[5]}
//! {"type":"order_filled","id":5,"price":10200,"volume":10}
//! {"type":"order_status","id":5,"filled_volume":10,"remaining_volume":0,"fees":-2}
//! {"type":"error","id":0,"message":"session warning"}
//! ```
//!
//! Level arrays may be shorter than five entries; missing levels are
//! zero-filled the way the venue reports an empty level. Instruments are
//! accepted by name (`"future"`, `"etf"`) or by wire code (`0`, `1`).

use crate::error::{FeedError, FeedResult};
use crate::event::VenueEvent;
use basis_core::{BookSnapshot, CoreError, Instrument, OrderId, Price, Volume, TOP_LEVEL_COUNT};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Parse outcome counters.
#[derive(Debug, Default)]
pub struct ParseStats {
    pub parsed_count: AtomicU64,
    pub rejected_count: AtomicU64,
    pub skipped_count: AtomicU64,
}

impl ParseStats {
    pub fn record_parsed(&self) {
        self.parsed_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.skipped_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn parsed(&self) -> u64 {
        self.parsed_count.load(Ordering::Relaxed)
    }

    pub fn rejected(&self) -> u64 {
        self.rejected_count.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.skipped_count.load(Ordering::Relaxed)
    }
}

/// Instrument as written on the wire.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawInstrument {
    Code(u8),
    Name(String),
}

impl RawInstrument {
    fn resolve(self) -> FeedResult<Instrument> {
        match self {
            Self::Code(code) => Ok(Instrument::try_from(code)?),
            Self::Name(name) => match name.to_ascii_lowercase().as_str() {
                "future" => Ok(Instrument::Future),
                "etf" => Ok(Instrument::Etf),
                _ => Err(FeedError::InvalidData(format!("unknown instrument {name:?}"))),
            },
        }
    }
}

/// Raw event line.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawEvent {
    OrderBookUpdate(RawBook),
    TradeTicks(RawBook),
    OrderFilled {
        id: u64,
        price: u64,
        volume: u64,
    },
    OrderStatus {
        id: u64,
        filled_volume: u64,
        remaining_volume: u64,
        #[serde(default)]
        fees: i64,
    },
    HedgeFilled {
        id: u64,
        price: u64,
        volume: u64,
    },
    Error {
        #[serde(default)]
        id: u64,
        #[serde(default)]
        message: String,
    },
    Disconnected,
}

/// Raw book levels (ask/bid prices and volumes, best-first).
#[derive(Debug, Deserialize)]
struct RawBook {
    instrument: RawInstrument,
    #[serde(default)]
    sequence_number: u64,
    #[serde(default)]
    ask_prices: Vec<u64>,
    #[serde(default)]
    ask_volumes: Vec<u64>,
    #[serde(default)]
    bid_prices: Vec<u64>,
    #[serde(default)]
    bid_volumes: Vec<u64>,
}

impl RawBook {
    fn into_parts(self) -> FeedResult<(Instrument, u64, BookSnapshot)> {
        let instrument = self.instrument.resolve()?;
        let book = BookSnapshot::new(
            levels(&self.ask_prices, "ask_prices")?.map(Price::new),
            levels(&self.ask_volumes, "ask_volumes")?.map(Volume::new),
            levels(&self.bid_prices, "bid_prices")?.map(Price::new),
            levels(&self.bid_volumes, "bid_volumes")?.map(Volume::new),
        );
        Ok((instrument, self.sequence_number, book))
    }
}

/// Zero-pad a level list to `TOP_LEVEL_COUNT` entries.
fn levels(values: &[u64], field: &str) -> FeedResult<[u64; TOP_LEVEL_COUNT]> {
    if values.len() > TOP_LEVEL_COUNT {
        return Err(CoreError::InvalidBook(format!(
            "{field} has {} levels, at most {TOP_LEVEL_COUNT} allowed",
            values.len()
        ))
        .into());
    }
    let mut out = [0u64; TOP_LEVEL_COUNT];
    out[..values.len()].copy_from_slice(values);
    Ok(out)
}

/// Decodes JSON-lines venue events.
#[derive(Debug, Default)]
pub struct EventParser {
    stats: ParseStats,
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse_line(&self, line: &str) -> FeedResult<Option<VenueEvent>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            self.stats.record_skipped();
            return Ok(None);
        }

        match Self::decode(trimmed) {
            Ok(event) => {
                self.stats.record_parsed();
                debug!(kind = event.kind(), "Parsed venue event");
                Ok(Some(event))
            }
            Err(e) => {
                self.stats.record_rejected();
                warn!(error = %e, line = %trimmed, "Rejected venue event line");
                Err(e)
            }
        }
    }

    /// Parse counters.
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    fn decode(line: &str) -> FeedResult<VenueEvent> {
        let raw: RawEvent = serde_json::from_str(line)?;
        let event = match raw {
            RawEvent::OrderBookUpdate(book) => {
                let (instrument, sequence_number, book) = book.into_parts()?;
                VenueEvent::OrderBookUpdate {
                    instrument,
                    sequence_number,
                    book,
                }
            }
            RawEvent::TradeTicks(book) => {
                let (instrument, sequence_number, book) = book.into_parts()?;
                VenueEvent::TradeTicks {
                    instrument,
                    sequence_number,
                    book,
                }
            }
            RawEvent::OrderFilled { id, price, volume } => VenueEvent::OrderFilled {
                id: OrderId::new(id),
                price: Price::new(price),
                volume: Volume::new(volume),
            },
            RawEvent::OrderStatus {
                id,
                filled_volume,
                remaining_volume,
                fees,
            } => VenueEvent::OrderStatus {
                id: OrderId::new(id),
                filled_volume: Volume::new(filled_volume),
                remaining_volume: Volume::new(remaining_volume),
                fees,
            },
            RawEvent::HedgeFilled { id, price, volume } => VenueEvent::HedgeFilled {
                id: OrderId::new(id),
                price: Price::new(price),
                volume: Volume::new(volume),
            },
            RawEvent::Error { id, message } => VenueEvent::Error {
                id: OrderId::new(id),
                message,
            },
            RawEvent::Disconnected => VenueEvent::Disconnected,
        };
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_update_pads_levels() {
        let parser = EventParser::new();
        let line = r#"{"type":"order_book_update","instrument":"etf","sequence_number":7,
            "ask_prices":[10200,10300],"ask_volumes":[5,6],"bid_prices":[10000],"bid_volumes":[4]}"#;
        let event = parser.parse_line(line).unwrap().unwrap();

        match event {
            VenueEvent::OrderBookUpdate {
                instrument,
                sequence_number,
                book,
            } => {
                assert_eq!(instrument, Instrument::Etf);
                assert_eq!(sequence_number, 7);
                assert_eq!(book.best_ask(), Price::new(10200));
                assert_eq!(book.ask_prices[1], Price::new(10300));
                assert_eq!(book.ask_prices[2], Price::ZERO);
                assert_eq!(book.best_bid(), Price::new(10000));
                assert_eq!(book.bid_volumes[0], Volume::new(4));
            }
            other => panic!("Expected OrderBookUpdate, got {other:?}"),
        }
        assert_eq!(parser.stats().parsed(), 1);
    }

    #[test]
    fn test_parse_instrument_by_code() {
        let parser = EventParser::new();
        let line = r#"{"type":"trade_ticks","instrument":0,"ask_prices":[1],"bid_prices":[1]}"#;
        let event = parser.parse_line(line).unwrap().unwrap();
        assert!(matches!(
            event,
            VenueEvent::TradeTicks {
                instrument: Instrument::Future,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_order_lifecycle_events() {
        let parser = EventParser::new();

        let filled = parser
            .parse_line(r#"{"type":"order_filled","id":5,"price":102,"volume":10}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            filled,
            VenueEvent::OrderFilled {
                id: OrderId::new(5),
                price: Price::new(102),
                volume: Volume::new(10),
            }
        );

        let status = parser
            .parse_line(r#"{"type":"order_status","id":5,"filled_volume":10,"remaining_volume":0}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            status,
            VenueEvent::OrderStatus {
                id: OrderId::new(5),
                filled_volume: Volume::new(10),
                remaining_volume: Volume::ZERO,
                fees: 0,
            }
        );

        let error = parser
            .parse_line(r#"{"type":"error","id":0,"message":"bad session"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            error,
            VenueEvent::Error {
                id: OrderId::NONE,
                message: "bad session".to_string(),
            }
        );

        let gone = parser.parse_line(r#"{"type":"disconnected"}"#).unwrap().unwrap();
        assert_eq!(gone, VenueEvent::Disconnected);
    }

    #[test]
    fn test_bare_error_is_global() {
        let parser = EventParser::new();
        let event = parser.parse_line(r#"{"type":"error"}"#).unwrap().unwrap();
        assert_eq!(
            event,
            VenueEvent::Error {
                id: OrderId::NONE,
                message: String::new(),
            }
        );
        assert_eq!(parser.stats().parsed(), 1);
        assert_eq!(parser.stats().rejected(), 0);
    }

    #[test]
    fn test_skip_blank_and_comment_lines() {
        let parser = EventParser::new();
        assert!(parser.parse_line("   ").unwrap().is_none());
        assert!(parser.parse_line("# replay header").unwrap().is_none());
        assert_eq!(parser.stats().skipped(), 2);
        assert_eq!(parser.stats().parsed(), 0);
    }

    #[test]
    fn test_reject_too_many_levels() {
        let parser = EventParser::new();
        let line = r#"{"type":"order_book_update","instrument":"future","ask_prices":[1,2,3,4,5,6]}"#;
        let err = parser.parse_line(line).unwrap_err();
        assert!(matches!(err, FeedError::Core(CoreError::InvalidBook(_))));
        assert_eq!(parser.stats().rejected(), 1);
    }

    #[test]
    fn test_reject_unknown_instrument_and_type() {
        let parser = EventParser::new();
        assert!(parser
            .parse_line(r#"{"type":"order_book_update","instrument":"bond"}"#)
            .is_err());
        assert!(parser
            .parse_line(r#"{"type":"order_book_update","instrument":9}"#)
            .is_err());
        assert!(parser.parse_line(r#"{"type":"heartbeat"}"#).is_err());
        assert!(parser.parse_line("not json").is_err());
        assert_eq!(parser.stats().rejected(), 4);
    }
}
