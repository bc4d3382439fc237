//! Action sink trait and implementations.

use std::pin::Pin;
use std::sync::Arc;

use basis_core::VenueAction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::error::{ExecutorError, ExecutorResult};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Destination for outbound venue actions.
pub trait ActionSink: Send + Sync {
    /// Deliver one action. Does not wait for venue acknowledgement.
    fn send(&self, action: VenueAction) -> BoxFuture<'_, ExecutorResult<()>>;

    /// Flush buffered output, if any.
    fn flush(&self) -> BoxFuture<'_, ExecutorResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

/// Arc wrapper for ActionSink trait objects.
pub type DynActionSink = Arc<dyn ActionSink>;

/// Forwards actions into a tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<VenueAction>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<VenueAction>) -> Self {
        Self { tx }
    }

    /// Sink plus the receiving end of a fresh bounded channel.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<VenueAction>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

impl ActionSink for ChannelSink {
    fn send(&self, action: VenueAction) -> BoxFuture<'_, ExecutorResult<()>> {
        Box::pin(async move { self.tx.send(action).await.map_err(|_| ExecutorError::Closed) })
    }
}

/// One line of JSON-lines output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub timestamp: DateTime<Utc>,
    pub action: VenueAction,
}

/// Writes each action as a timestamped JSON line.
pub struct JsonLinesSink<W> {
    writer: tokio::sync::Mutex<W>,
}

impl<W> JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: tokio::sync::Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W> ActionSink for JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn send(&self, action: VenueAction) -> BoxFuture<'_, ExecutorResult<()>> {
        Box::pin(async move {
            let record = ActionRecord {
                timestamp: Utc::now(),
                action,
            };
            let mut line = serde_json::to_vec(&record)?;
            line.push(b'\n');

            let mut writer = self.writer.lock().await;
            writer.write_all(&line).await?;
            Ok(())
        })
    }

    fn flush(&self) -> BoxFuture<'_, ExecutorResult<()>> {
        Box::pin(async move {
            self.writer.lock().await.flush().await?;
            Ok(())
        })
    }
}

/// Mock sink for testing.
#[derive(Debug, Default)]
pub struct MockActionSink {
    /// Recorded sends for verification.
    sends: parking_lot::Mutex<Vec<VenueAction>>,
    /// When set, every send fails with this message.
    failure: parking_lot::Mutex<Option<String>>,
}

impl MockActionSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail (or succeed again with `None`).
    pub fn set_failure(&self, failure: Option<String>) {
        *self.failure.lock() = failure;
    }

    pub fn get_sends(&self) -> Vec<VenueAction> {
        self.sends.lock().clone()
    }

    pub fn clear_sends(&self) {
        self.sends.lock().clear();
    }
}

impl ActionSink for MockActionSink {
    fn send(&self, action: VenueAction) -> BoxFuture<'_, ExecutorResult<()>> {
        Box::pin(async move {
            if let Some(reason) = self.failure.lock().clone() {
                return Err(ExecutorError::SendFailed(reason));
            }
            self.sends.lock().push(action);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_core::{Lifespan, OrderId, Price, Side, Volume};

    fn insert(id: u64) -> VenueAction {
        VenueAction::InsertOrder {
            id: OrderId::new(id),
            side: Side::Buy,
            price: Price::new(10_100),
            volume: Volume::new(10),
            lifespan: Lifespan::GoodForDay,
        }
    }

    #[tokio::test]
    async fn test_mock_sink_records_sends() {
        let sink = MockActionSink::new();
        sink.send(insert(1)).await.unwrap();
        sink.send(VenueAction::CancelOrder { id: OrderId::new(1) })
            .await
            .unwrap();

        let sends = sink.get_sends();
        assert_eq!(sends.len(), 2);
        assert!(sends[0].is_insert());
        assert!(sends[1].is_cancel());

        sink.clear_sends();
        assert!(sink.get_sends().is_empty());
    }

    #[tokio::test]
    async fn test_mock_sink_failure() {
        let sink = MockActionSink::new();
        sink.set_failure(Some("venue down".to_string()));
        let result = sink.send(insert(1)).await;
        assert!(matches!(result, Err(ExecutorError::SendFailed(_))));
        assert!(sink.get_sends().is_empty());
    }

    #[tokio::test]
    async fn test_channel_sink_forwards_in_order() {
        let (sink, mut rx) = ChannelSink::channel(4);
        tokio_test::assert_ok!(sink.send(insert(1)).await);
        tokio_test::assert_ok!(sink.send(insert(2)).await);

        assert_eq!(rx.recv().await.unwrap().order_id(), OrderId::new(1));
        assert_eq!(rx.recv().await.unwrap().order_id(), OrderId::new(2));
    }

    #[tokio::test]
    async fn test_channel_sink_closed() {
        let (sink, rx) = ChannelSink::channel(1);
        drop(rx);
        let result = sink.send(insert(1)).await;
        assert!(matches!(result, Err(ExecutorError::Closed)));
    }

    #[tokio::test]
    async fn test_json_lines_sink_writes_records() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.send(insert(3)).await.unwrap();
        sink.send(VenueAction::HedgeOrder {
            id: OrderId::new(4),
            side: Side::Sell,
            price: Price::new(100),
            volume: Volume::new(10),
        })
        .await
        .unwrap();
        sink.flush().await.unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: ActionRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.action, insert(3));
        assert!(lines[1].contains(r#""type":"hedge_order""#));
    }
}
