//! JSON-lines event replay.
//!
//! Stands in for the exchange connectivity layer: reads one venue event per
//! line and pushes it onto the strategy's event queue. Lines that fail to
//! parse are logged and skipped.

use basis_feed::{EventParser, VenueEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::AppResult;

/// Parse counters for one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub parsed: u64,
    pub rejected: u64,
    pub skipped: u64,
}

/// Read events from `reader` until EOF and forward them to `tx`.
///
/// Stops early when the receiving side is dropped. Dropping `tx` on return
/// closes the queue, which ends the application loop.
pub async fn replay_events<R>(reader: R, tx: mpsc::Sender<VenueEvent>) -> AppResult<ReplaySummary>
where
    R: AsyncBufRead + Unpin,
{
    let parser = EventParser::new();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        // Rejections are logged by the parser
        let Ok(Some(event)) = parser.parse_line(&line) else {
            continue;
        };
        if tx.send(event).await.is_err() {
            debug!("Event queue closed, stopping replay");
            break;
        }
    }

    let stats = parser.stats();
    let summary = ReplaySummary {
        parsed: stats.parsed(),
        rejected: stats.rejected(),
        skipped: stats.skipped(),
    };
    info!(
        parsed = summary.parsed,
        rejected = summary.rejected,
        skipped = summary.skipped,
        "Replay finished"
    );
    Ok(summary)
}

/// Run `replay_events` on its own task.
pub fn spawn_replay<R>(reader: R, tx: mpsc::Sender<VenueEvent>) -> JoinHandle<AppResult<ReplaySummary>>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(replay_events(reader, tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    const SESSION: &str = r#"
# warm-up
{"type":"order_book_update","instrument":"future","sequence_number":1,"ask_prices":[302],"ask_volumes":[5],"bid_prices":[300],"bid_volumes":[5]}
not json
{"type":"order_book_update","instrument":1,"sequence_number":1,"ask_prices":[102],"ask_volumes":[5],"bid_prices":[100],"bid_volumes":[5]}
"#;

    #[tokio::test]
    async fn test_replay_forwards_valid_lines() {
        let (tx, mut rx) = mpsc::channel(8);
        let summary = replay_events(BufReader::new(SESSION.as_bytes()), tx)
            .await
            .unwrap();

        assert_eq!(summary.parsed, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.skipped, 2);

        let mut kinds = Vec::new();
        while let Some(event) = rx.recv().await {
            kinds.push(event.kind());
        }
        assert_eq!(kinds, vec!["order_book_update", "order_book_update"]);
    }

    #[tokio::test]
    async fn test_replay_stops_when_queue_closed() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let summary = replay_events(BufReader::new(SESSION.as_bytes()), tx)
            .await
            .unwrap();
        assert_eq!(summary.parsed, 1);
    }
}
