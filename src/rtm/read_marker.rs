//! Read-marker batching.
//!
//! Message events record the newest timestamp per channel; a periodic
//! flush issues one mark call per channel and clears the map. Failed marks
//! are not retried.

use super::event::UnifiedEvent;
use crate::errors::SlackResult;
use crate::observability::RtmMetrics;
use crate::types::{ChannelId, Timestamp};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Moves the read cursor of a conversation
#[async_trait]
pub trait ChannelMarker: Send + Sync {
    /// Mark `channel` read up to `ts`
    async fn mark(&self, channel: &ChannelId, ts: &Timestamp) -> SlackResult<()>;
}

/// Newest timestamp seen in a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadMarker {
    /// Conversation
    pub channel: ChannelId,
    /// Newest message timestamp
    pub ts: Timestamp,
}

/// Coalesces read markers and flushes them in batches
pub struct ReadMarkerBatcher {
    marker: Arc<dyn ChannelMarker>,
    pending: Mutex<HashMap<ChannelId, Timestamp>>,
    metrics: Arc<RtmMetrics>,
}

impl ReadMarkerBatcher {
    /// Create a batcher over a marker
    pub fn new(marker: Arc<dyn ChannelMarker>, metrics: Arc<RtmMetrics>) -> Self {
        Self {
            marker,
            pending: Mutex::new(HashMap::new()),
            metrics,
        }
    }

    /// Record a message event. Last write wins per channel.
    pub fn observe(&self, event: &UnifiedEvent) {
        if !event.is_message() || event.channel.is_empty() || event.ts.is_empty() {
            return;
        }
        self.pending
            .lock()
            .insert(event.channel.clone(), event.ts.clone());
    }

    /// Markers waiting for the next flush, ordered by channel
    pub fn pending(&self) -> Vec<ReadMarker> {
        let mut markers: Vec<_> = self
            .pending
            .lock()
            .iter()
            .map(|(channel, ts)| ReadMarker {
                channel: channel.clone(),
                ts: ts.clone(),
            })
            .collect();
        markers.sort_by(|a, b| a.channel.cmp(&b.channel));
        markers
    }

    /// Issue one mark call per pending channel. Returns the number of
    /// channels marked.
    pub async fn flush(&self) -> usize {
        let mut batch: Vec<_> = self.pending.lock().drain().collect();
        if batch.is_empty() {
            return 0;
        }
        batch.sort_by(|a, b| a.0.cmp(&b.0));

        let mut marked = 0;
        for (channel, ts) in &batch {
            match self.marker.mark(channel, ts).await {
                Ok(()) => marked += 1,
                Err(e) => warn!(
                    channel = %channel,
                    ts = %ts,
                    error = %e,
                    "Failed to mark channel read"
                ),
            }
        }

        let failed = batch.len() - marked;
        self.metrics.record_marks(marked as u64, failed as u64);
        debug!(marked, failed, "Flushed read markers");
        marked
    }

    /// Flush every `period` until cancelled
    pub fn spawn(
        self: Arc<Self>,
        period: Duration,
        flush_on_stop: bool,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        self.flush().await;
                    }
                }
            }

            if flush_on_stop {
                self.flush().await;
            }
            debug!("Read marker batcher stopped");
        })
    }
}

impl std::fmt::Debug for ReadMarkerBatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadMarkerBatcher")
            .field("pending", &self.pending.lock().len())
            .finish()
    }
}
