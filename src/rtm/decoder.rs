//! Frame decoding and normalization.
//!
//! The `type` discriminator is read once and selects the wire shape. Shapes
//! that nest a channel or user object are flattened onto the common
//! identifier and name fields of [`UnifiedEvent`].

use super::event::{EventError, UnifiedEvent, ERROR_KIND};
use crate::types::{ChannelId, UserId};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Event types whose `channel` field is a channel object
pub const CHANNEL_EVENTS: &[&str] = &[
    "channel_created",
    "channel_joined",
    "channel_rename",
    "im_created",
    "group_joined",
    "group_left",
    "group_rename",
];

/// Event types whose `user` field is a user object
pub const USER_EVENTS: &[&str] = &["user_change", "team_join"];

/// Why a frame could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The frame ended before a complete JSON value
    #[error("unexpected EOF")]
    UnexpectedEof,

    /// The frame is valid JSON but not an object
    #[error("expected a JSON object")]
    NotAnObject,

    /// The frame is not valid JSON or does not match its shape
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Channel-like object nested in channel family events. `group_left`
/// and a few others send a bare identifier instead.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NestedChannel {
    Id(ChannelId),
    Object(ChannelObject),
}

#[derive(Debug, Default, Deserialize)]
struct ChannelObject {
    #[serde(default)]
    id: ChannelId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    creator: Option<UserId>,
    /// Other participant of an IM
    #[serde(default)]
    user: Option<UserId>,
}

#[derive(Debug, Deserialize)]
struct ChannelFrame {
    #[serde(rename = "type")]
    kind: String,
    channel: NestedChannel,
    #[serde(default)]
    user: Option<UserId>,
}

#[derive(Debug, Default, Deserialize)]
struct UserObject {
    #[serde(default)]
    id: UserId,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserFrame {
    #[serde(rename = "type")]
    kind: String,
    user: UserObject,
}

/// A frame classified by its `type`
#[derive(Debug)]
enum WireEvent {
    Channel(ChannelFrame),
    User(UserFrame),
    Message(UnifiedEvent),
    Other(UnifiedEvent),
}

impl WireEvent {
    fn parse(frame: &str) -> Result<Self, DecodeError> {
        if frame.trim().is_empty() {
            return Err(DecodeError::UnexpectedEof);
        }

        let value: Value = serde_json::from_str(frame).map_err(|e| {
            if e.is_eof() {
                DecodeError::UnexpectedEof
            } else {
                DecodeError::Json(e)
            }
        })?;
        if !value.is_object() {
            return Err(DecodeError::NotAnObject);
        }

        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
        let event = if CHANNEL_EVENTS.contains(&kind) {
            Self::Channel(serde_json::from_value(value)?)
        } else if USER_EVENTS.contains(&kind) {
            Self::User(serde_json::from_value(value)?)
        } else if kind == "message" {
            Self::Message(serde_json::from_value(value)?)
        } else {
            Self::Other(serde_json::from_value(value)?)
        };
        Ok(event)
    }

    fn normalize(self) -> UnifiedEvent {
        match self {
            Self::Channel(frame) => {
                let (channel, name, user) = match frame.channel {
                    NestedChannel::Id(id) => (id, None, frame.user),
                    NestedChannel::Object(object) => (
                        object.id,
                        object.name,
                        object.creator.or(object.user).or(frame.user),
                    ),
                };
                UnifiedEvent {
                    kind: frame.kind,
                    channel,
                    user: user.unwrap_or_default(),
                    name,
                    ..Default::default()
                }
            }
            Self::User(frame) => UnifiedEvent {
                kind: frame.kind,
                user: frame.user.id,
                name: frame.user.name,
                ..Default::default()
            },
            Self::Message(event) | Self::Other(event) => event,
        }
    }
}

/// Decode one frame. The flag is true when the frame could not be parsed;
/// the event is then an `error` event describing the failure.
pub fn decode(frame: &str) -> (UnifiedEvent, bool) {
    match WireEvent::parse(frame) {
        Ok(wire) => {
            let mut event = wire.normalize();
            if event.kind == ERROR_KIND {
                event.error.get_or_insert_with(EventError::default);
            } else {
                if let Some(error) = event.error.take() {
                    debug!(
                        reply_to = ?event.reply_to,
                        code = error.code,
                        msg = %error.msg,
                        "Dropping error record from non-error event"
                    );
                }
            }
            (event, false)
        }
        Err(e) => (UnifiedEvent::parse_failure(e.to_string()), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_message_frame() {
        let (event, failed) = decode(
            r#"{"type":"message","channel":"C1","user":"U1","text":"hi","ts":"1.000100"}"#,
        );
        assert!(!failed);
        assert_eq!(event.kind, "message");
        assert_eq!(event.channel.as_str(), "C1");
        assert_eq!(event.user.as_str(), "U1");
        assert_eq!(event.text, "hi");
        assert_eq!(event.ts.as_str(), "1.000100");
        assert!(event.error.is_none());
    }

    #[test]
    fn test_edited_message_frame() {
        let (event, _) = decode(
            r#"{"type":"message","subtype":"message_changed","hidden":true,"channel":"C1","ts":"2.0",
                "message":{"type":"message","user":"U1","text":"new","ts":"1.0","edited":{"user":"U1","ts":"2.0"}}}"#,
        );
        assert_eq!(event.subtype.as_deref(), Some("message_changed"));
        assert!(event.hidden);
        let nested = event.message.unwrap();
        assert_eq!(nested.text, "new");
        assert_eq!(nested.edited.unwrap().ts.as_str(), "2.0");
    }

    #[test_case("channel_created" ; "channel created")]
    #[test_case("channel_joined" ; "channel joined")]
    #[test_case("channel_rename" ; "channel rename")]
    #[test_case("group_joined" ; "group joined")]
    #[test_case("group_rename" ; "group rename")]
    fn test_channel_family_is_flattened(kind: &str) {
        let frame = format!(
            r#"{{"type":"{kind}","channel":{{"id":"C024BE91L","name":"fun","created":1360782804,"creator":"U024BE7LH"}}}}"#
        );
        let (event, failed) = decode(&frame);
        assert!(!failed);
        assert_eq!(event.kind, kind);
        assert_eq!(event.channel.as_str(), "C024BE91L");
        assert_eq!(event.user.as_str(), "U024BE7LH");
        assert_eq!(event.name.as_deref(), Some("fun"));
    }

    #[test]
    fn test_im_created_uses_participant() {
        let (event, _) = decode(
            r#"{"type":"im_created","user":"U1","channel":{"id":"D1","user":"U2","is_im":true}}"#,
        );
        assert_eq!(event.channel.as_str(), "D1");
        assert_eq!(event.user.as_str(), "U2");
    }

    #[test]
    fn test_group_left_with_bare_id() {
        let (event, failed) = decode(r#"{"type":"group_left","channel":"G1"}"#);
        assert!(!failed);
        assert_eq!(event.channel.as_str(), "G1");
    }

    #[test_case("team_join" ; "team join")]
    #[test_case("user_change" ; "user change")]
    fn test_user_family_is_flattened(kind: &str) {
        let frame = format!(
            r#"{{"type":"{kind}","user":{{"id":"U9","name":"bobby","profile":{{"email":"b@x.io"}}}}}}"#
        );
        let (event, failed) = decode(&frame);
        assert!(!failed);
        assert_eq!(event.user.as_str(), "U9");
        assert_eq!(event.name.as_deref(), Some("bobby"));
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let (event, failed) =
            decode(r#"{"type":"presence_change","user":"U1","presence":"away"}"#);
        assert!(!failed);
        assert_eq!(event.kind, "presence_change");
        assert_eq!(event.user.as_str(), "U1");
    }

    #[test]
    fn test_server_error_is_not_parse_failure() {
        let (event, failed) =
            decode(r#"{"type":"error","error":{"code":1,"msg":"Socket URL has expired"}}"#);
        assert!(!failed);
        assert!(event.is_connection_fatal());
        let error = event.error.unwrap();
        assert_eq!(error.code, 1);
        assert_eq!(error.msg, "Socket URL has expired");
    }

    #[test]
    fn test_failed_reply_keeps_error_invariant() {
        let (event, failed) =
            decode(r#"{"ok":false,"reply_to":3,"error":{"code":2,"msg":"message text is missing"}}"#);
        assert!(!failed);
        assert_eq!(event.reply_to, Some(3));
        assert_eq!(event.ok, Some(false));
        assert!(event.error.is_none());
        assert!(!event.is_error());
    }

    #[test_case(r#"{"type":"message","channel":"#; "truncated")]
    #[test_case(""; "empty")]
    fn test_eof_is_parse_failure(frame: &str) {
        let (event, failed) = decode(frame);
        assert!(failed);
        assert!(event.is_parse_failure());
        let error = event.error.unwrap();
        assert_eq!(error.code, 0);
        assert_eq!(error.msg, "unexpected EOF");
    }

    #[test_case("not json"; "garbage")]
    #[test_case(r#"{"type":"message","channel":42}"#; "wrong field type")]
    #[test_case(r#"{"type":"channel_created","channel":true}"#; "bad nested channel")]
    #[test_case("[1,2]"; "not an object")]
    #[test_case("[]"; "empty array")]
    #[test_case(r#"["message","C1","U1","hi","9.0"]"#; "positional message")]
    #[test_case("\"message\""; "bare string")]
    fn test_malformed_frames(frame: &str) {
        let (event, failed) = decode(frame);
        assert!(failed);
        assert_eq!(event.kind, "error");
        assert!(event.is_parse_failure());
        assert!(!event.is_connection_fatal());
    }

    #[test]
    fn test_error_kind_always_carries_record() {
        let (event, failed) = decode(r#"{"type":"error"}"#);
        assert!(!failed);
        assert_eq!(event.error, Some(EventError::default()));
        assert!(event.is_connection_fatal());
        assert!(!event.is_parse_failure());
    }
}
