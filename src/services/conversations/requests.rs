//! Request types for conversations service.

use crate::client::Params;
use crate::types::{ChannelId, Timestamp};

/// Request for `*.history`
#[derive(Debug, Clone, Default)]
pub struct HistoryRequest {
    /// Conversation to read
    pub channel: ChannelId,
    /// End of the time range
    pub latest: Option<Timestamp>,
    /// Start of the time range
    pub oldest: Option<Timestamp>,
    /// Include messages with `latest` or `oldest` timestamps
    pub inclusive: bool,
    /// Number of messages to return
    pub count: Option<u32>,
}

impl HistoryRequest {
    /// Create a new request
    pub fn new(channel: impl Into<ChannelId>) -> Self {
        Self {
            channel: channel.into(),
            ..Default::default()
        }
    }

    /// Set the end of the range
    pub fn latest(mut self, ts: impl Into<Timestamp>) -> Self {
        self.latest = Some(ts.into());
        self
    }

    /// Set the start of the range
    pub fn oldest(mut self, ts: impl Into<Timestamp>) -> Self {
        self.oldest = Some(ts.into());
        self
    }

    /// Include boundary messages
    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    /// Limit the number of messages
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .set("channel", self.channel.as_str())
            .set_opt("latest", self.latest.as_ref())
            .set_opt("oldest", self.oldest.as_ref())
            .flag("inclusive", self.inclusive)
            .set_opt("count", self.count.filter(|c| *c > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_params() {
        let params = HistoryRequest::new("C1")
            .oldest("1.0")
            .inclusive(true)
            .count(0)
            .to_params();

        assert_eq!(params.get("channel"), Some("C1"));
        assert_eq!(params.get("oldest"), Some("1.0"));
        assert_eq!(params.get("latest"), None);
        assert_eq!(params.get("inclusive"), Some("1"));
        assert_eq!(params.get("count"), None);
    }
}
