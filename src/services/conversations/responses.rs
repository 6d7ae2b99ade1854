//! Response types for conversations service.

use crate::types::{Channel, ChannelId, Group, Im, Message, Timestamp};
use serde::Deserialize;

/// Bare `{"ok": true}` acknowledgement
#[derive(Debug, Clone, Deserialize)]
pub struct OkResponse {
    /// Success indicator
    pub ok: bool,
}

/// Response carrying a channel
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelResponse {
    /// Success indicator
    pub ok: bool,
    /// The channel
    #[serde(default)]
    pub channel: Channel,
}

/// Response carrying a group
#[derive(Debug, Clone, Deserialize)]
pub struct GroupResponse {
    /// Success indicator
    pub ok: bool,
    /// The group
    #[serde(default)]
    pub group: Group,
}

/// Summary returned by rename
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenamedChannel {
    /// Conversation ID
    #[serde(default)]
    pub id: ChannelId,
    /// New name
    #[serde(default)]
    pub name: String,
    /// Creation time (Unix)
    #[serde(default)]
    pub created: i64,
    /// Whether it is a channel
    #[serde(default)]
    pub is_channel: bool,
    /// Whether it is a group
    #[serde(default)]
    pub is_group: bool,
}

/// Response from `*.rename`
#[derive(Debug, Clone, Deserialize)]
pub struct RenameResponse {
    /// Success indicator
    pub ok: bool,
    /// The renamed conversation
    #[serde(default)]
    pub channel: RenamedChannel,
}

/// Response from `*.history`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    /// Success indicator
    pub ok: bool,
    /// Latest timestamp in the range
    #[serde(default)]
    pub latest: Option<Timestamp>,
    /// Whether more messages exist
    #[serde(default)]
    pub has_more: bool,
    /// Messages, newest first
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Response from `channels.list`
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListResponse {
    /// Success indicator
    pub ok: bool,
    /// Channels
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// Response from `groups.list`
#[derive(Debug, Clone, Deserialize)]
pub struct GroupListResponse {
    /// Success indicator
    pub ok: bool,
    /// Groups
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Response from `im.list`
#[derive(Debug, Clone, Deserialize)]
pub struct ImListResponse {
    /// Success indicator
    pub ok: bool,
    /// IMs
    #[serde(default)]
    pub ims: Vec<Im>,
}

/// Response from `*.setPurpose`
#[derive(Debug, Clone, Deserialize)]
pub struct PurposeResponse {
    /// Success indicator
    pub ok: bool,
    /// The new purpose
    #[serde(default)]
    pub purpose: String,
}

/// Response from `*.setTopic`
#[derive(Debug, Clone, Deserialize)]
pub struct TopicResponse {
    /// Success indicator
    pub ok: bool,
    /// The new topic
    #[serde(default)]
    pub topic: String,
}

/// Response from `*.open` and `*.close`
#[derive(Debug, Clone, Deserialize)]
pub struct OpenCloseResponse {
    /// Success indicator
    pub ok: bool,
    /// Nothing changed
    #[serde(default)]
    pub no_op: bool,
    /// The conversation was already closed
    #[serde(default)]
    pub already_closed: bool,
    /// The conversation was already open
    #[serde(default)]
    pub already_open: bool,
}
