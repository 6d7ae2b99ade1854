//! Request types for messages service.

use crate::client::Params;
use crate::errors::{SlackError, SlackResult};
use crate::types::{Attachment, ChannelId, Timestamp};

/// Replace `&`, `<` and `>` with their HTML entities
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Request to post a message
#[derive(Debug, Clone, Default)]
pub struct PostMessageRequest {
    /// Channel, group or IM to send to
    pub channel: ChannelId,
    /// Message text
    pub text: String,
    /// Custom username
    pub username: Option<String>,
    /// Post as the authenticated user
    pub as_user: bool,
    /// Parse mode (full, none)
    pub parse: Option<String>,
    /// Linkify channel names and usernames
    pub link_names: bool,
    /// Attachments
    pub attachments: Vec<Attachment>,
    /// Enable link unfurling
    pub unfurl_links: bool,
    /// Enable media unfurling
    pub unfurl_media: bool,
    /// Bot icon URL
    pub icon_url: Option<String>,
    /// Bot icon emoji
    pub icon_emoji: Option<String>,
    /// Thread to reply in
    pub thread_ts: Option<Timestamp>,
    /// Escape `&`, `<`, `>` in the text before sending
    pub escape: bool,
}

impl PostMessageRequest {
    /// Create a new message request
    pub fn new(channel: impl Into<ChannelId>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Escape the text before sending
    pub fn escaped(mut self) -> Self {
        self.escape = true;
        self
    }

    /// Set the username
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Post as the authenticated user
    pub fn as_user(mut self, as_user: bool) -> Self {
        self.as_user = as_user;
        self
    }

    /// Add an attachment
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Reply in a thread
    pub fn thread_ts(mut self, ts: impl Into<Timestamp>) -> Self {
        self.thread_ts = Some(ts.into());
        self
    }

    /// Set the bot icon emoji
    pub fn icon_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.icon_emoji = Some(emoji.into());
        self
    }

    pub(crate) fn to_params(&self) -> SlackResult<Params> {
        if self.channel.is_empty() {
            return Err(SlackError::validation("You must specify the channel to post to"));
        }

        let text = if self.escape {
            escape_text(&self.text)
        } else {
            self.text.clone()
        };

        let mut params = Params::new()
            .set("channel", self.channel.as_str())
            .set("text", text)
            .set_opt("username", self.username.as_deref())
            .set("as_user", self.as_user.to_string())
            .set_opt("parse", self.parse.as_deref())
            .flag("link_names", self.link_names)
            .set("unfurl_links", self.unfurl_links.to_string())
            .set("unfurl_media", self.unfurl_media.to_string())
            .set_opt("icon_url", self.icon_url.as_deref())
            .set_opt("icon_emoji", self.icon_emoji.as_deref())
            .set_opt("thread_ts", self.thread_ts.as_ref());

        if !self.attachments.is_empty() {
            let attachments = serde_json::to_string(&self.attachments).map_err(|e| {
                SlackError::Request(crate::errors::RequestError::InvalidFormData {
                    message: e.to_string(),
                })
            })?;
            params = params.set("attachments", attachments);
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a & b <c> d"), "a &amp; b &lt;c&gt; d");
        assert_eq!(escape_text("&amp;"), "&amp;amp;");
        assert_eq!(escape_text("plain"), "plain");
    }

    #[test]
    fn test_params_escape_only_when_requested() {
        let raw = PostMessageRequest::new("C1", "<b>").to_params().unwrap();
        assert_eq!(raw.get("text"), Some("<b>"));

        let escaped = PostMessageRequest::new("C1", "<b>").escaped().to_params().unwrap();
        assert_eq!(escaped.get("text"), Some("&lt;b&gt;"));
    }

    #[test]
    fn test_params_optional_fields() {
        let params = PostMessageRequest::new("C1", "hi")
            .thread_ts("1.2")
            .attachment(Attachment {
                text: Some("att".to_string()),
                ..Default::default()
            })
            .to_params()
            .unwrap();

        assert_eq!(params.get("thread_ts"), Some("1.2"));
        assert_eq!(params.get("as_user"), Some("false"));
        assert_eq!(params.get("username"), None);
        assert_eq!(params.get("attachments"), Some(r#"[{"text":"att"}]"#));
    }

    #[test]
    fn test_missing_channel_rejected() {
        assert!(PostMessageRequest::new("", "hi").to_params().is_err());
    }
}
