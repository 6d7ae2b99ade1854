//! Metrics collection for the Slack client.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for API calls and the RTM stream
#[derive(Debug, Default)]
pub struct RtmMetrics {
    /// Calls per API method
    api_calls: RwLock<HashMap<String, AtomicU64>>,
    /// Failed calls per API method
    api_errors: RwLock<HashMap<String, AtomicU64>>,
    frames_received: AtomicU64,
    parse_failures: AtomicU64,
    connection_errors: AtomicU64,
    reconnect_attempts: AtomicU64,
    reconnects: AtomicU64,
    messages_sent: AtomicU64,
    marks_flushed: AtomicU64,
    mark_failures: AtomicU64,
}

impl RtmMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an API call and its outcome
    pub fn record_api_call(&self, method: &str, success: bool) {
        bump(&self.api_calls, method);
        if !success {
            bump(&self.api_errors, method);
        }
    }

    /// Record an inbound frame
    pub fn record_frame(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a frame that failed to decode
    pub fn record_parse_failure(&self) {
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a connection-fatal error
    pub fn record_connection_error(&self) {
        self.connection_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a reconnection attempt and whether it succeeded
    pub fn record_reconnect(&self, success: bool) {
        self.reconnect_attempts.fetch_add(1, Ordering::Relaxed);
        if success {
            self.reconnects.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record an outbound RTM message
    pub fn record_message_sent(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of one read marker flush
    pub fn record_marks(&self, flushed: u64, failed: u64) {
        self.marks_flushed.fetch_add(flushed, Ordering::Relaxed);
        self.mark_failures.fetch_add(failed, Ordering::Relaxed);
    }

    /// Calls made to an API method
    pub fn api_call_count(&self, method: &str) -> u64 {
        read(&self.api_calls, method)
    }

    /// Failed calls to an API method
    pub fn api_error_count(&self, method: &str) -> u64 {
        read(&self.api_errors, method)
    }

    /// Get a snapshot of the stream counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_received: self.frames_received.load(Ordering::Relaxed),
            parse_failures: self.parse_failures.load(Ordering::Relaxed),
            connection_errors: self.connection_errors.load(Ordering::Relaxed),
            reconnect_attempts: self.reconnect_attempts.load(Ordering::Relaxed),
            reconnects: self.reconnects.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            marks_flushed: self.marks_flushed.load(Ordering::Relaxed),
            mark_failures: self.mark_failures.load(Ordering::Relaxed),
        }
    }
}

fn bump(counters: &RwLock<HashMap<String, AtomicU64>>, key: &str) {
    if let Some(counter) = counters.read().get(key) {
        counter.fetch_add(1, Ordering::Relaxed);
        return;
    }
    counters
        .write()
        .entry(key.to_string())
        .or_insert_with(|| AtomicU64::new(0))
        .fetch_add(1, Ordering::Relaxed);
}

fn read(counters: &RwLock<HashMap<String, AtomicU64>>, key: &str) -> u64 {
    counters
        .read()
        .get(key)
        .map(|c| c.load(Ordering::Relaxed))
        .unwrap_or(0)
}

/// Point-in-time copy of the stream counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Inbound frames
    pub frames_received: u64,
    /// Frames that failed to decode
    pub parse_failures: u64,
    /// Connection-fatal errors
    pub connection_errors: u64,
    /// Reconnection attempts
    pub reconnect_attempts: u64,
    /// Successful reconnections
    pub reconnects: u64,
    /// Outbound RTM messages
    pub messages_sent: u64,
    /// Channels marked read
    pub marks_flushed: u64,
    /// Failed mark calls
    pub mark_failures: u64,
}
