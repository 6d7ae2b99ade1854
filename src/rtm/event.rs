//! The single record every inbound RTM frame is normalized into.

use crate::types::{ChannelId, Comment, File, MessageEdited, Reaction, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;

/// Kind of events that carry an [`EventError`]
pub const ERROR_KIND: &str = "error";

/// Error sub-record of an `error` event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventError {
    /// Server error code, 0 for local failures
    #[serde(default)]
    pub code: i64,
    /// Error message
    #[serde(default)]
    pub msg: String,
    /// Set when the frame could not be decoded. Never read from the wire.
    #[serde(skip)]
    pub is_parse_failure: bool,
}

/// Original message carried by `message_changed` events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedMessage {
    /// Message type
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Author
    #[serde(default)]
    pub user: UserId,
    /// Text
    #[serde(default)]
    pub text: String,
    /// Timestamp
    #[serde(default)]
    pub ts: Timestamp,
    /// Edit information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited: Option<MessageEdited>,
}

/// Opaque caller value attached to every event of a session
#[derive(Clone)]
pub struct EventContext(Arc<dyn Any + Send + Sync>);

impl EventContext {
    /// Wrap a value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for EventContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EventContext(..)")
    }
}

/// One inbound RTM event, whatever its wire shape.
///
/// `kind == "error"` means [`UnifiedEvent::error`] is authoritative; every
/// other kind carries `error: None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnifiedEvent {
    /// Event type, e.g. `message` or `channel_created`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Channel, group or IM
    #[serde(default)]
    pub channel: ChannelId,
    /// User
    #[serde(default)]
    pub user: UserId,
    /// Message text
    #[serde(default)]
    pub text: String,
    /// Server timestamp
    #[serde(default)]
    pub ts: Timestamp,
    /// Hidden from the channel view
    #[serde(default)]
    pub hidden: bool,
    /// Message subtype
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Edit information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited: Option<MessageEdited>,
    /// Original message of an edit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<NestedMessage>,
    /// Timestamp of a deleted message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_ts: Option<Timestamp>,
    /// New topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// New purpose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Channel or user name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Previous name of a renamed channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_name: Option<String>,
    /// Members joined or left
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<UserId>,
    /// Message carries an upload
    #[serde(default)]
    pub upload: bool,
    /// Shared file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<File>,
    /// File comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    /// Reactions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    /// Id of the outbound message this frame acknowledges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<u64>,
    /// Outcome of an acknowledged send
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    /// Error details for `error` events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EventError>,
    /// Caller value, never interpreted
    #[serde(skip)]
    pub context: Option<EventContext>,
}

impl UnifiedEvent {
    /// `error` event for a frame that failed to decode
    pub fn parse_failure(msg: impl Into<String>) -> Self {
        Self::error_event(msg.into(), true)
    }

    /// `error` event for a lost or broken connection
    pub fn connection_error(msg: impl Into<String>) -> Self {
        Self::error_event(msg.into(), false)
    }

    fn error_event(msg: String, is_parse_failure: bool) -> Self {
        Self {
            kind: ERROR_KIND.to_string(),
            error: Some(EventError {
                code: 0,
                msg,
                is_parse_failure,
            }),
            ..Default::default()
        }
    }

    /// True for `error` events
    pub fn is_error(&self) -> bool {
        self.kind == ERROR_KIND
    }

    /// True for `message` events
    pub fn is_message(&self) -> bool {
        self.kind == "message"
    }

    /// A frame that could not be decoded. The connection is still healthy.
    pub fn is_parse_failure(&self) -> bool {
        self.is_error() && self.error.as_ref().is_some_and(|e| e.is_parse_failure)
    }

    /// An error the connection does not survive: a server error event or
    /// the end of the stream.
    pub fn is_connection_fatal(&self) -> bool {
        self.is_error() && !self.is_parse_failure()
    }

    /// Attach the caller's context
    pub fn with_context(mut self, context: Option<EventContext>) -> Self {
        self.context = context;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let parse = UnifiedEvent::parse_failure("bad frame");
        assert!(parse.is_parse_failure());
        assert!(!parse.is_connection_fatal());

        let closed = UnifiedEvent::connection_error("connection closed");
        assert!(closed.is_error());
        assert!(closed.is_connection_fatal());
        assert_eq!(closed.error.as_ref().map(|e| e.code), Some(0));

        let message = UnifiedEvent {
            kind: "message".to_string(),
            ..Default::default()
        };
        assert!(!message.is_connection_fatal());
        assert!(message.is_message());
    }

    #[test]
    fn test_parse_failure_flag_is_not_read_from_wire() {
        let event: UnifiedEvent = serde_json::from_str(
            r#"{"type":"error","error":{"code":1,"msg":"x","is_parse_failure":true}}"#,
        )
        .unwrap();
        assert!(event.is_connection_fatal());
    }

    #[test]
    fn test_context_downcast() {
        let event = UnifiedEvent::default().with_context(Some(EventContext::new(42u32)));
        let context = event.context.unwrap();
        assert_eq!(context.downcast_ref::<u32>(), Some(&42));
        assert_eq!(context.downcast_ref::<String>(), None);
    }
}
