//! Batch forwarding of strategy actions.

use std::sync::atomic::{AtomicU64, Ordering};

use basis_core::VenueAction;
use tracing::{debug, warn};

use crate::error::ExecutorResult;
use crate::sink::DynActionSink;

/// Dispatch counters.
#[derive(Debug, Default)]
pub struct DispatchStats {
    sent: AtomicU64,
    failed: AtomicU64,
}

impl DispatchStats {
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Sends each batch of actions to a sink, in order.
///
/// A failed send is logged and counted; the remaining actions of the batch
/// are still attempted. There is no retry: the strategy learns about lost
/// orders through later venue events.
pub struct ActionDispatcher {
    sink: DynActionSink,
    stats: DispatchStats,
}

impl ActionDispatcher {
    pub fn new(sink: DynActionSink) -> Self {
        Self {
            sink,
            stats: DispatchStats::default(),
        }
    }

    /// Forward a batch. Returns how many actions were delivered.
    pub async fn dispatch(&self, actions: Vec<VenueAction>) -> usize {
        let mut delivered = 0;
        for action in actions {
            let kind = action.kind();
            let id = action.order_id();
            match self.sink.send(action).await {
                Ok(()) => {
                    delivered += 1;
                    self.stats.sent.fetch_add(1, Ordering::Relaxed);
                    debug!(kind, order_id = %id, "Action sent");
                }
                Err(e) => {
                    self.stats.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(kind, order_id = %id, error = %e, "Action send failed");
                }
            }
        }
        delivered
    }

    pub async fn flush(&self) -> ExecutorResult<()> {
        self.sink.flush().await
    }

    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MockActionSink;
    use basis_core::OrderId;
    use std::sync::Arc;

    fn cancels(ids: &[u64]) -> Vec<VenueAction> {
        ids.iter()
            .map(|&id| VenueAction::CancelOrder { id: OrderId::new(id) })
            .collect()
    }

    #[tokio::test]
    async fn test_dispatch_preserves_order() {
        let sink = Arc::new(MockActionSink::new());
        let dispatcher = ActionDispatcher::new(sink.clone());

        assert_eq!(dispatcher.dispatch(cancels(&[3, 1, 2])).await, 3);
        let ids: Vec<u64> = sink.get_sends().iter().map(|a| a.order_id().inner()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(dispatcher.stats().sent(), 3);
        assert_eq!(dispatcher.stats().failed(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_counts_failures() {
        let sink = Arc::new(MockActionSink::new());
        sink.set_failure(Some("closed".to_string()));
        let dispatcher = ActionDispatcher::new(sink.clone());

        assert_eq!(dispatcher.dispatch(cancels(&[1, 2])).await, 0);
        assert_eq!(dispatcher.stats().failed(), 2);

        sink.set_failure(None);
        assert_eq!(dispatcher.dispatch(cancels(&[3])).await, 1);
        assert_eq!(dispatcher.stats().sent(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let dispatcher = ActionDispatcher::new(Arc::new(MockActionSink::new()));
        assert_eq!(dispatcher.dispatch(Vec::new()).await, 0);
        dispatcher.flush().await.unwrap();
    }
}
