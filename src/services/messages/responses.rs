//! Response types for messages service.

use crate::types::{ChannelId, Message, Timestamp};
use serde::Deserialize;

/// Response from chat.postMessage
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    /// Success indicator
    pub ok: bool,
    /// Channel the message was posted to
    #[serde(default)]
    pub channel: ChannelId,
    /// Timestamp of the new message
    #[serde(default)]
    pub ts: Timestamp,
    /// The message as stored
    #[serde(default)]
    pub message: Option<Message>,
}
