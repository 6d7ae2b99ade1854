//! Wire types for the RTM bootstrap call and outbound frames.

use crate::types::{Bot, Channel, Group, Im, Team, Timestamp, User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The connecting user, as reported by `rtm.start`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RtmSelf {
    /// User ID
    #[serde(default)]
    pub id: UserId,
    /// User name
    #[serde(default)]
    pub name: String,
    /// User preferences
    #[serde(default)]
    pub prefs: HashMap<String, serde_json::Value>,
    /// Account creation time (Unix)
    #[serde(default)]
    pub created: i64,
    /// Manually set presence
    #[serde(default)]
    pub manual_presence: String,
}

/// Response from rtm.start: the socket URL plus a roster of the team
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RtmStartResponse {
    /// Success indicator
    #[serde(default)]
    pub ok: bool,
    /// WebSocket URL, valid for a short time
    #[serde(default)]
    pub url: String,
    /// The connecting user
    #[serde(rename = "self", default)]
    pub self_info: RtmSelf,
    /// Team
    #[serde(default)]
    pub team: Team,
    /// Timestamp of the latest event before this connection
    #[serde(default)]
    pub latest_event_ts: Timestamp,
    /// Channels
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Private groups
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Direct messages
    #[serde(default)]
    pub ims: Vec<Im>,
    /// Users
    #[serde(default)]
    pub users: Vec<User>,
    /// Bots
    #[serde(default)]
    pub bots: Vec<Bot>,
}

/// Message written to the socket by [`RtmSession::send`](super::RtmSession::send)
#[derive(Debug, Serialize)]
pub(crate) struct OutboundMessage<'a> {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub channel: &'a str,
    pub text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_shape() {
        let frame = serde_json::to_value(OutboundMessage {
            id: 7,
            kind: "message",
            channel: "C1",
            text: "hi",
        })
        .unwrap();
        assert_eq!(
            frame,
            serde_json::json!({"id": 7, "type": "message", "channel": "C1", "text": "hi"})
        );
    }

    #[test]
    fn test_start_response_tolerates_missing_fields() {
        let info: RtmStartResponse = serde_json::from_str(
            r#"{"ok":true,"url":"wss://example/websocket/abc","self":{"id":"U1","name":"bot"}}"#,
        )
        .unwrap();
        assert_eq!(info.self_info.id.as_str(), "U1");
        assert!(info.channels.is_empty());
    }
}
