//! Reconnection supervisor.
//!
//! Owns the consumer-facing event stream. When the connection is lost, either
//! because the inbound stream ended or because a non-parse `error` event
//! arrived, the supervisor closes the source, waits a fixed delay and opens
//! it again, repeating until it succeeds or is cancelled. The consumer keeps
//! the same receiver throughout.

use super::event::UnifiedEvent;
use super::read_marker::ReadMarkerBatcher;
use crate::config::{ParseFailurePolicy, RtmConfig};
use crate::errors::SlackResult;
use crate::observability::RtmMetrics;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Something that produces a stream of events per connection
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Open a new connection and return its events
    async fn open(&self) -> SlackResult<mpsc::Receiver<UnifiedEvent>>;

    /// Close the current connection, if any
    async fn close(&self);
}

/// Connection state published by the supervisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Events are flowing
    Connected,
    /// The connection was lost; waiting to retry
    Reconnecting,
    /// The supervisor has exited
    Stopped,
}

enum PumpOutcome {
    ConnectionLost,
    ConsumerGone,
    Cancelled,
}

/// Forwards events from a source to one long-lived receiver, reconnecting
/// on connection loss.
pub struct Supervisor {
    source: Arc<dyn EventSource>,
    events: mpsc::Sender<UnifiedEvent>,
    status: watch::Sender<ConnectionStatus>,
    batcher: Option<Arc<ReadMarkerBatcher>>,
    metrics: Arc<RtmMetrics>,
    reconnect_delay: Duration,
    parse_failures: ParseFailurePolicy,
    deliver_connection_errors: bool,
}

impl Supervisor {
    /// Create a supervisor and the consumer's event and status receivers
    pub fn new(
        source: Arc<dyn EventSource>,
        config: &RtmConfig,
        metrics: Arc<RtmMetrics>,
    ) -> (
        Self,
        mpsc::Receiver<UnifiedEvent>,
        watch::Receiver<ConnectionStatus>,
    ) {
        let (events, events_rx) = mpsc::channel(config.event_buffer.max(1));
        let (status, status_rx) = watch::channel(ConnectionStatus::Connected);
        let supervisor = Self {
            source,
            events,
            status,
            batcher: None,
            metrics,
            reconnect_delay: config.reconnect_delay,
            parse_failures: config.parse_failures,
            deliver_connection_errors: config.deliver_connection_errors,
        };
        (supervisor, events_rx, status_rx)
    }

    /// Record read markers for every forwarded event
    pub fn with_batcher(mut self, batcher: Arc<ReadMarkerBatcher>) -> Self {
        self.batcher = Some(batcher);
        self
    }

    /// Run on a new task
    pub fn spawn(
        self,
        inbound: mpsc::Receiver<UnifiedEvent>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(inbound, cancel))
    }

    /// Forward events from an already open connection until cancelled or the
    /// consumer drops its receiver.
    pub async fn run(self, mut inbound: mpsc::Receiver<UnifiedEvent>, cancel: CancellationToken) {
        self.status.send_replace(ConnectionStatus::Connected);

        loop {
            match self.pump(&mut inbound, &cancel).await {
                PumpOutcome::ConnectionLost => {}
                PumpOutcome::ConsumerGone => {
                    debug!("RTM consumer dropped its receiver");
                    break;
                }
                PumpOutcome::Cancelled => break,
            }

            self.metrics.record_connection_error();
            self.source.close().await;
            self.status.send_replace(ConnectionStatus::Reconnecting);

            match self.reconnect(&cancel).await {
                Some(fresh) => {
                    inbound = fresh;
                    self.status.send_replace(ConnectionStatus::Connected);
                }
                None => break,
            }
        }

        self.source.close().await;
        self.status.send_replace(ConnectionStatus::Stopped);
        info!("RTM supervisor stopped");
    }

    async fn pump(
        &self,
        inbound: &mut mpsc::Receiver<UnifiedEvent>,
        cancel: &CancellationToken,
    ) -> PumpOutcome {
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return PumpOutcome::Cancelled,
                next = inbound.recv() => next,
            };

            let Some(event) = next else {
                warn!("RTM event stream ended");
                return PumpOutcome::ConnectionLost;
            };

            if event.is_parse_failure() {
                if self.parse_failures == ParseFailurePolicy::Drop {
                    continue;
                }
            } else if event.is_connection_fatal() {
                let error = event.error.clone().unwrap_or_default();
                warn!(code = error.code, msg = %error.msg, "RTM connection lost");
                if self.deliver_connection_errors {
                    if let Some(outcome) = self.forward(event, cancel).await {
                        return outcome;
                    }
                }
                return PumpOutcome::ConnectionLost;
            } else if let Some(batcher) = &self.batcher {
                batcher.observe(&event);
            }

            if let Some(outcome) = self.forward(event, cancel).await {
                return outcome;
            }
        }
    }

    async fn forward(&self, event: UnifiedEvent, cancel: &CancellationToken) -> Option<PumpOutcome> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Some(PumpOutcome::Cancelled),
            sent = self.events.send(event) => sent.err().map(|_| PumpOutcome::ConsumerGone),
        }
    }

    async fn reconnect(&self, cancel: &CancellationToken) -> Option<mpsc::Receiver<UnifiedEvent>> {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return None,
                _ = self.events.closed() => return None,
                _ = tokio::time::sleep(self.reconnect_delay) => {}
            }

            info!("Reconnecting to RTM");
            let attempt = tokio::select! {
                _ = cancel.cancelled() => return None,
                attempt = self.source.open() => attempt,
            };

            match attempt {
                Ok(events) => {
                    self.metrics.record_reconnect(true);
                    info!("RTM reconnected");
                    return Some(events);
                }
                Err(e) => {
                    self.metrics.record_reconnect(false);
                    warn!(
                        error = %e,
                        code = e.error_code(),
                        retry_in = ?self.reconnect_delay,
                        "RTM reconnect failed"
                    );
                }
            }
        }
    }
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("reconnect_delay", &self.reconnect_delay)
            .field("parse_failures", &self.parse_failures)
            .field("deliver_connection_errors", &self.deliver_connection_errors)
            .finish()
    }
}
