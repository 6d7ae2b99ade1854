//! Reactions service for Slack API.
//!
//! Emoji reactions on messages, files and file comments. A target is either
//! a file, a file comment, or a message given by channel and timestamp.

use crate::client::{ApiInvoker, Params};
use crate::errors::{SlackError, SlackResult};
use crate::types::{ChannelId, Comment, File, Message, Paging, Timestamp, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

/// The item a reaction is attached to
#[derive(Debug, Clone, Default)]
pub struct ReactionTarget {
    /// File ID
    pub file: Option<String>,
    /// File comment ID
    pub file_comment: Option<String>,
    /// Channel of the message
    pub channel: Option<ChannelId>,
    /// Timestamp of the message
    pub timestamp: Option<Timestamp>,
}

impl ReactionTarget {
    /// A message in a channel
    pub fn message(channel: impl Into<ChannelId>, timestamp: impl Into<Timestamp>) -> Self {
        Self {
            channel: Some(channel.into()),
            timestamp: Some(timestamp.into()),
            ..Default::default()
        }
    }

    /// A file
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Default::default()
        }
    }

    /// A file comment
    pub fn file_comment(comment: impl Into<String>) -> Self {
        Self {
            file_comment: Some(comment.into()),
            ..Default::default()
        }
    }

    fn validate(&self) -> SlackResult<()> {
        let present = |v: Option<&str>| v.is_some_and(|s| !s.is_empty());
        let has_message = present(self.channel.as_ref().map(ChannelId::as_str))
            && present(self.timestamp.as_ref().map(Timestamp::as_str));

        if present(self.file.as_deref()) || present(self.file_comment.as_deref()) || has_message {
            Ok(())
        } else {
            Err(SlackError::validation(
                "provide file or file_comment or both channel and timestamp",
            ))
        }
    }

    fn params(&self) -> Params {
        Params::new()
            .set_if_not_empty("file", self.file.as_deref().unwrap_or_default())
            .set_if_not_empty("file_comment", self.file_comment.as_deref().unwrap_or_default())
            .set_if_not_empty("channel", self.channel.as_ref().map_or("", ChannelId::as_str))
            .set_if_not_empty("timestamp", self.timestamp.as_ref().map_or("", Timestamp::as_str))
    }
}

/// Request for reactions.add and reactions.remove
#[derive(Debug, Clone)]
pub struct ReactionRequest {
    /// Emoji name without colons
    pub name: String,
    /// Item to react to
    pub target: ReactionTarget,
}

impl ReactionRequest {
    /// Create a new request
    pub fn new(name: impl Into<String>, target: ReactionTarget) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    fn to_params(&self) -> SlackResult<Params> {
        if self.name.is_empty() {
            return Err(SlackError::validation("provide the emoji name"));
        }
        self.target.validate()?;
        Ok(self.target.params().set("name", self.name.as_str()))
    }
}

/// Request for reactions.list
#[derive(Debug, Clone, Default)]
pub struct ListReactionsRequest {
    /// Reactions made by this user; the caller when unset
    pub user: Option<UserId>,
    /// Return the full reaction user lists
    pub full: bool,
    /// Items per page
    pub count: Option<u32>,
    /// Page number
    pub page: Option<u32>,
}

impl ListReactionsRequest {
    fn to_params(&self) -> Params {
        Params::new()
            .set_opt("user", self.user.as_ref())
            .set_opt("full", self.full.then_some("true"))
            .set_opt("count", self.count.filter(|c| *c > 0))
            .set_opt("page", self.page.filter(|p| *p > 0))
    }
}

/// An item carrying reactions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReactedItem {
    /// `message`, `file` or `file_comment`
    #[serde(rename = "type", default)]
    pub item_type: String,
    /// Channel of a message item
    #[serde(default)]
    pub channel: ChannelId,
    /// The message
    #[serde(default)]
    pub message: Option<Message>,
    /// The file
    #[serde(default)]
    pub file: Option<File>,
    /// The file comment
    #[serde(default)]
    pub comment: Option<Comment>,
}

/// Response from reactions.add and reactions.remove
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionResponse {
    /// Success indicator
    pub ok: bool,
}

/// Response from reactions.get
#[derive(Debug, Clone, Deserialize)]
pub struct GetReactionsResponse {
    /// Success indicator
    pub ok: bool,
    /// The item and its reactions
    #[serde(flatten)]
    pub item: ReactedItem,
}

/// Response from reactions.list
#[derive(Debug, Clone, Deserialize)]
pub struct ListReactionsResponse {
    /// Success indicator
    pub ok: bool,
    /// Items reacted to
    #[serde(default)]
    pub items: Vec<ReactedItem>,
    /// Page information
    #[serde(default)]
    pub paging: Paging,
}

/// Trait for reactions service operations
#[async_trait]
pub trait ReactionsServiceTrait: Send + Sync {
    /// Add a reaction
    async fn add(&self, request: ReactionRequest) -> SlackResult<ReactionResponse>;

    /// Remove a reaction
    async fn remove(&self, request: ReactionRequest) -> SlackResult<ReactionResponse>;

    /// Get the reactions on an item
    async fn get(&self, target: ReactionTarget, full: bool) -> SlackResult<GetReactionsResponse>;

    /// List items a user reacted to
    async fn list(&self, request: ListReactionsRequest) -> SlackResult<ListReactionsResponse>;
}

/// Reactions service implementation
#[derive(Clone)]
pub struct ReactionsService {
    invoker: Arc<ApiInvoker>,
}

impl ReactionsService {
    /// Create a new reactions service
    pub fn new(invoker: Arc<ApiInvoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl ReactionsServiceTrait for ReactionsService {
    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn add(&self, request: ReactionRequest) -> SlackResult<ReactionResponse> {
        let params = request.to_params()?;
        self.invoker.call("reactions.add", params).await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn remove(&self, request: ReactionRequest) -> SlackResult<ReactionResponse> {
        let params = request.to_params()?;
        self.invoker.call("reactions.remove", params).await
    }

    #[instrument(skip(self, target))]
    async fn get(&self, target: ReactionTarget, full: bool) -> SlackResult<GetReactionsResponse> {
        target.validate()?;
        let params = target.params().set_opt("full", full.then_some("true"));
        self.invoker.call("reactions.get", params).await
    }

    #[instrument(skip(self, request))]
    async fn list(&self, request: ListReactionsRequest) -> SlackResult<ListReactionsResponse> {
        self.invoker.call("reactions.list", request.to_params()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_validation() {
        assert!(ReactionTarget::message("C1", "1.0").validate().is_ok());
        assert!(ReactionTarget::file("F1").validate().is_ok());
        assert!(ReactionTarget::file_comment("Fc1").validate().is_ok());
        assert!(ReactionTarget::default().validate().is_err());

        let channel_only = ReactionTarget {
            channel: Some(ChannelId::new("C1")),
            ..Default::default()
        };
        assert!(channel_only.validate().is_err());
    }

    #[test]
    fn test_reaction_params() {
        let params = ReactionRequest::new("thumbsup", ReactionTarget::message("C1", "1.0"))
            .to_params()
            .unwrap();
        assert_eq!(params.get("name"), Some("thumbsup"));
        assert_eq!(params.get("channel"), Some("C1"));
        assert_eq!(params.get("timestamp"), Some("1.0"));
        assert_eq!(params.get("file"), None);

        let err = ReactionRequest::new("", ReactionTarget::file("F1"))
            .to_params()
            .unwrap_err();
        assert!(err.to_string().contains("emoji name"));
    }

    #[test]
    fn test_list_params() {
        let params = ListReactionsRequest {
            user: Some(UserId::new("U1")),
            full: true,
            count: Some(0),
            page: Some(2),
        }
        .to_params();
        assert_eq!(params.get("user"), Some("U1"));
        assert_eq!(params.get("full"), Some("true"));
        assert_eq!(params.get("count"), None);
        assert_eq!(params.get("page"), Some("2"));
    }
}
