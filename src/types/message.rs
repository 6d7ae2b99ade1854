//! Message-related types for the Slack API.

use super::{ChannelId, FileId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Slack message as returned by history and posting methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// Message type
    #[serde(rename = "type", default)]
    pub message_type: String,
    /// Message subtype
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Message text
    #[serde(default)]
    pub text: String,
    /// User who sent the message
    #[serde(default)]
    pub user: UserId,
    /// Bot ID if sent by a bot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
    /// Username (for bot messages)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Message timestamp (unique ID)
    #[serde(default)]
    pub ts: Timestamp,
    /// Channel ID (included in some responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelId>,
    /// Edited info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited: Option<MessageEdited>,
    /// Reactions on this message
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    /// Attachments
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Shared file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<File>,
}

impl Message {
    /// Check if this message is from a bot
    pub fn is_bot_message(&self) -> bool {
        self.bot_id.is_some() || self.subtype.as_deref() == Some("bot_message")
    }
}

/// Message edit information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEdited {
    /// User who edited
    #[serde(default)]
    pub user: UserId,
    /// Edit timestamp
    #[serde(default)]
    pub ts: Timestamp,
}

/// Reaction on a message, file or file comment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Emoji name (without colons)
    pub name: String,
    /// Reaction count
    #[serde(default)]
    pub count: u32,
    /// Users who reacted
    #[serde(default)]
    pub users: Vec<UserId>,
}

/// Message attachment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachment {
    /// Fallback text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// Color bar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Pretext
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    /// Author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Author link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,
    /// Author icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,
    /// Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Title link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    /// Main text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Thumb URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    /// Which fields are formatted as mrkdwn
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mrkdwn_in: Vec<String>,
}

/// Attachment field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttachmentField {
    /// Field title
    pub title: String,
    /// Field value
    pub value: String,
    /// Whether short (side-by-side)
    #[serde(default)]
    pub short: bool,
}

/// Comment on a file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comment {
    /// Comment ID
    #[serde(default)]
    pub id: String,
    /// Unix time of the comment
    #[serde(default)]
    pub timestamp: i64,
    /// Author
    #[serde(default)]
    pub user: UserId,
    /// Comment text
    #[serde(default)]
    pub comment: String,
    /// Creation time (Unix)
    #[serde(default)]
    pub created: i64,
}

/// Uploaded or shared file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct File {
    /// File ID
    #[serde(default)]
    pub id: FileId,
    /// Creation time (Unix)
    #[serde(default)]
    pub created: i64,
    /// File name
    #[serde(default)]
    pub name: String,
    /// File title
    #[serde(default)]
    pub title: String,
    /// MIME type
    #[serde(default)]
    pub mimetype: String,
    /// File type (Slack's classification)
    #[serde(default)]
    pub filetype: String,
    /// Human readable file type
    #[serde(default)]
    pub pretty_type: String,
    /// Uploader
    #[serde(default)]
    pub user: UserId,
    /// Upload mode (hosted, external, snippet, post)
    #[serde(default)]
    pub mode: String,
    /// Whether the file is editable
    #[serde(default)]
    pub editable: bool,
    /// Whether the file is stored outside Slack
    #[serde(default)]
    pub is_external: bool,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Private URL
    #[serde(default)]
    pub url_private: String,
    /// Private download URL
    #[serde(default)]
    pub url_private_download: String,
    /// Permanent link
    #[serde(default)]
    pub permalink: String,
    /// Whether shared publicly
    #[serde(default)]
    pub is_public: bool,
    /// Channels the file is shared in
    #[serde(default)]
    pub channels: Vec<ChannelId>,
    /// Groups the file is shared in
    #[serde(default)]
    pub groups: Vec<ChannelId>,
    /// Comment posted with the upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_comment: Option<Comment>,
    /// Star count
    #[serde(default)]
    pub num_stars: u32,
    /// Whether starred by the caller
    #[serde(default)]
    pub is_starred: bool,
}
