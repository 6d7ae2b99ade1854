//! Common types for the Slack API.
//!
//! Identifier newtypes plus the records shared by the services and the
//! RTM stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod channel;
pub mod message;
pub mod user;

pub use channel::*;
pub use message::*;
pub use user::*;

/// Slack timestamp (ts), `"<seconds>.<micros>"`. Unique per message within a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    /// Create a new timestamp
    pub fn new(ts: impl Into<String>) -> Self {
        Self(ts.into())
    }

    /// Get the timestamp as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no timestamp was present on the wire
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse timestamp to DateTime
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let (secs, micros) = self.0.split_once('.').unwrap_or((self.0.as_str(), "0"));
        let secs = secs.parse::<i64>().ok()?;
        let micros = micros.parse::<u32>().unwrap_or(0);
        DateTime::from_timestamp(secs, micros.saturating_mul(1_000))
    }
}

impl From<String> for Timestamp {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The API family a conversation identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationKind {
    /// Public channel (`C…`)
    Channel,
    /// Private group (`G…`)
    Group,
    /// Direct message (`D…`)
    Im,
}

impl ConversationKind {
    /// Method namespace for this family, as in `channels.mark`
    pub fn method_prefix(&self) -> &'static str {
        match self {
            Self::Channel => "channels",
            Self::Group => "groups",
            Self::Im => "im",
        }
    }
}

/// Slack channel, group or IM ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl ChannelId {
    /// Create a new channel ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no channel was present on the wire
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Family of this identifier, by its first character. Unknown prefixes
    /// are treated as public channels.
    pub fn kind(&self) -> ConversationKind {
        match self.0.as_bytes().first() {
            Some(b'G') => ConversationKind::Group,
            Some(b'D') => ConversationKind::Im,
            _ => ConversationKind::Channel,
        }
    }

    /// Full method name for an operation on this conversation, e.g. `groups.mark`
    pub fn method(&self, operation: &str) -> String {
        format!("{}.{}", self.kind().method_prefix(), operation)
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slack user ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create a new user ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no user was present on the wire
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slack team/workspace ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    /// Create a new team ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slack file ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

impl FileId {
    /// Create a new file ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Page information returned by list methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paging {
    /// Items per page
    #[serde(default)]
    pub count: u32,
    /// Total items
    #[serde(default)]
    pub total: u32,
    /// Current page
    #[serde(default)]
    pub page: u32,
    /// Number of pages
    #[serde(default)]
    pub pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_datetime() {
        let ts = Timestamp::new("1234567890.123456");
        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.timestamp(), 1234567890);
        assert_eq!(dt.timestamp_subsec_micros(), 123456);
        assert!(Timestamp::default().to_datetime().is_none());
    }

    #[test]
    fn test_channel_id_routing() {
        assert_eq!(ChannelId::new("C024BE91L").kind(), ConversationKind::Channel);
        assert_eq!(ChannelId::new("G024BE91L").kind(), ConversationKind::Group);
        assert_eq!(ChannelId::new("D024BE91L").kind(), ConversationKind::Im);
        assert_eq!(ChannelId::new("D1").method("mark"), "im.mark");
        assert_eq!(ChannelId::new("G1").method("history"), "groups.history");
        assert_eq!(ChannelId::default().method("mark"), "channels.mark");
    }
}
