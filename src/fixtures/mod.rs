//! Test fixtures: RTM frames and Slack API response bodies.

use crate::rtm::{decode, UnifiedEvent};
use serde_json::{json, Value};

/// A `message` frame
pub fn message_frame(channel: &str, user: &str, text: &str, ts: &str) -> String {
    json!({
        "type": "message",
        "channel": channel,
        "user": user,
        "text": text,
        "ts": ts
    })
    .to_string()
}

/// A decoded `message` event
pub fn message_event(channel: &str, ts: &str) -> UnifiedEvent {
    decode(&message_frame(channel, "U1", "hello", ts)).0
}

/// A server `error` frame
pub fn error_frame(code: i64, msg: &str) -> String {
    json!({ "type": "error", "error": { "code": code, "msg": msg } }).to_string()
}

/// A decoded server error, which ends the connection
pub fn server_error_event(code: i64, msg: &str) -> UnifiedEvent {
    decode(&error_frame(code, msg)).0
}

/// A decoded frame that failed to parse
pub fn parse_failure_event() -> UnifiedEvent {
    decode("{not json").0
}

/// A `channel_created` frame with a nested channel object
pub fn channel_created_frame(id: &str, name: &str, creator: &str) -> String {
    json!({
        "type": "channel_created",
        "channel": { "id": id, "name": name, "created": 1360782804, "creator": creator }
    })
    .to_string()
}

/// A `team_join` frame with a nested user object
pub fn team_join_frame(id: &str, name: &str) -> String {
    json!({ "type": "team_join", "user": { "id": id, "name": name, "deleted": false } })
        .to_string()
}

/// API response bodies
pub mod responses {
    use super::*;

    /// `{"ok":true}`
    pub fn ok() -> Value {
        json!({ "ok": true })
    }

    /// An error reply
    pub fn error(code: &str) -> Value {
        json!({ "ok": false, "error": code })
    }

    /// An `auth.test` reply
    pub fn auth_test() -> Value {
        json!({
            "ok": true,
            "url": "https://team.slack.com/",
            "team": "Test Team",
            "user": "bob",
            "team_id": "T1234567890",
            "user_id": "U1234567890"
        })
    }

    /// An `rtm.start` reply pointing at `url`
    pub fn rtm_start(url: &str) -> Value {
        json!({
            "ok": true,
            "url": url,
            "self": { "id": "U1234567890", "name": "bob", "prefs": {}, "created": 1402463766 },
            "team": { "id": "T1234567890", "name": "Test Team", "domain": "test" },
            "latest_event_ts": "1402463766.000000",
            "channels": [
                { "id": "C1234567890", "name": "general", "is_channel": true, "is_member": true }
            ],
            "groups": [
                { "id": "G1234567890", "name": "secret", "is_group": true }
            ],
            "ims": [
                { "id": "D1234567890", "user": "U0987654321", "is_im": true }
            ],
            "users": [
                { "id": "U1234567890", "name": "bob" },
                { "id": "U0987654321", "name": "alice" }
            ],
            "bots": [
                { "id": "B1234567890", "name": "helper" }
            ]
        })
    }

    /// A `chat.postMessage` reply
    pub fn post_message(channel: &str, ts: &str) -> Value {
        json!({
            "ok": true,
            "channel": channel,
            "ts": ts,
            "message": { "type": "message", "text": "hi", "user": "U1234567890", "ts": ts }
        })
    }

    /// A `users.info` reply
    pub fn user_info(id: &str, name: &str) -> Value {
        json!({
            "ok": true,
            "user": {
                "id": id,
                "name": name,
                "real_name": "Test User",
                "profile": { "email": "test@example.com" }
            }
        })
    }

    /// An `emoji.list` reply
    pub fn emoji_list() -> Value {
        json!({
            "ok": true,
            "emoji": {
                "bowtie": "https://emoji.slack-edge.com/T1/bowtie/f3ec6f2bb0.png",
                "squirrel": "https://emoji.slack-edge.com/T1/squirrel/4b5ea2c5d0.png",
                "shipit": "alias:squirrel"
            }
        })
    }

    /// A `files.upload` reply
    pub fn file_upload(id: &str, name: &str) -> Value {
        json!({
            "ok": true,
            "file": { "id": id, "name": name, "title": name, "filetype": "text" }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_fixtures() {
        let message = message_event("C1", "1.0");
        assert!(message.is_message());
        assert_eq!(message.channel.as_str(), "C1");

        let error = server_error_event(1, "socket URL has expired");
        assert!(error.is_connection_fatal());
        assert!(parse_failure_event().is_parse_failure());
    }

    #[test]
    fn test_rtm_start_fixture_decodes() {
        let info: crate::rtm::RtmStartResponse =
            serde_json::from_value(responses::rtm_start("ws://127.0.0.1:1")).unwrap();
        assert_eq!(info.self_info.name, "bob");
        assert_eq!(info.channels.len(), 1);
        assert_eq!(info.ims[0].user.as_str(), "U0987654321");
    }
}
