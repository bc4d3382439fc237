//! Main application logic.

use crate::config::AppConfig;
use crate::error::AppResult;
use basis_executor::{ActionDispatcher, DynActionSink, JsonLinesSink};
use basis_feed::VenueEvent;
use basis_strategy::{AutoTrader, SessionSummary};
use basis_telemetry::Metrics;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Boxed event source.
pub type EventInput = Box<dyn AsyncBufRead + Unpin + Send>;

/// Owns the strategy and drives it from the event queue.
///
/// Events are handled one at a time: each is fully processed and its
/// actions dispatched before the next is read.
pub struct Application {
    config: AppConfig,
    trader: AutoTrader,
    dispatcher: ActionDispatcher,
}

impl Application {
    /// Create an application writing actions to `sink`.
    pub fn new(config: AppConfig, sink: DynActionSink) -> AppResult<Self> {
        config.validate()?;
        let trader = AutoTrader::new(config.strategy.clone());
        Ok(Self {
            config,
            trader,
            dispatcher: ActionDispatcher::new(sink),
        })
    }

    /// Action sink for the configured output (file, else stdout).
    pub async fn output_sink(config: &AppConfig) -> AppResult<DynActionSink> {
        match &config.replay.output {
            Some(path) => {
                let file = tokio::fs::File::create(path).await?;
                info!(path = %path, "Writing actions to file");
                Ok(Arc::new(JsonLinesSink::new(file)))
            }
            None => Ok(Arc::new(JsonLinesSink::new(tokio::io::stdout()))),
        }
    }

    /// Event source for the configured input (file, else stdin).
    pub async fn open_input(config: &AppConfig) -> AppResult<EventInput> {
        match &config.replay.input {
            Some(path) => {
                let file = tokio::fs::File::open(path).await?;
                info!(path = %path, "Replaying events from file");
                Ok(Box::new(BufReader::new(file)))
            }
            None => {
                info!("Replaying events from stdin");
                Ok(Box::new(BufReader::new(tokio::io::stdin())))
            }
        }
    }

    /// Bounded event queue sized from the config.
    pub fn event_channel(&self) -> (mpsc::Sender<VenueEvent>, mpsc::Receiver<VenueEvent>) {
        mpsc::channel(self.config.channel_capacity)
    }

    pub fn trader(&self) -> &AutoTrader {
        &self.trader
    }

    /// Run one event through the strategy and send its actions.
    ///
    /// Returns the number of actions delivered.
    pub async fn handle_event(&mut self, event: &VenueEvent) -> usize {
        let actions = self.trader.on_event(event);
        if actions.is_empty() {
            return 0;
        }
        self.dispatcher.dispatch(actions).await
    }

    /// Drain `events` until the queue closes or a shutdown signal arrives.
    pub async fn run(mut self, mut events: mpsc::Receiver<VenueEvent>) -> AppResult<SessionSummary> {
        info!(
            position_limit = self.config.strategy.position_limit,
            tick_size = self.config.strategy.tick_size,
            gamma = %self.config.strategy.gamma,
            "Starting event loop"
        );

        loop {
            tokio::select! {
                maybe_event = events.recv() => {
                    match maybe_event {
                        Some(event) => {
                            self.handle_event(&event).await;
                        }
                        None => {
                            info!("Event stream ended");
                            break;
                        }
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        self.shutdown().await
    }

    async fn shutdown(self) -> AppResult<SessionSummary> {
        if let Err(e) = self.dispatcher.flush().await {
            warn!(error = %e, "Failed to flush action sink");
        }

        let summary = self.trader.summary();
        info!(
            position = summary.position,
            mu = %summary.mu,
            crossings = summary.crossing_count,
            live_orders = summary.live_orders,
            events = summary.events_processed,
            inserted = summary.orders_inserted,
            cancelled = summary.orders_cancelled,
            fills = summary.fills,
            hedges = summary.hedges_sent,
            actions_sent = self.dispatcher.stats().sent(),
            actions_failed = self.dispatcher.stats().failed(),
            "Session summary"
        );

        if self.config.telemetry.metrics_enabled {
            let text = Metrics::gather_text()?;
            info!(metrics = %text, "Metrics snapshot");
        }

        Ok(summary)
    }
}
