//! Conversations service implementation.

use super::*;
use crate::client::{ApiInvoker, Params};
use crate::errors::SlackResult;
use crate::rtm::ChannelMarker;
use crate::types::{ChannelId, Timestamp, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for conversations service operations
#[async_trait]
pub trait ConversationsServiceTrait: Send + Sync {
    /// Archive a channel or group
    async fn archive(&self, channel: &ChannelId) -> SlackResult<OkResponse>;

    /// Unarchive a channel or group
    async fn unarchive(&self, channel: &ChannelId) -> SlackResult<OkResponse>;

    /// Fetch the history of a channel, group or IM
    async fn history(&self, request: HistoryRequest) -> SlackResult<HistoryResponse>;

    /// Remove a user from a channel or group
    async fn kick(&self, channel: &ChannelId, user: &UserId) -> SlackResult<OkResponse>;

    /// Leave a channel or group
    async fn leave(&self, channel: &ChannelId) -> SlackResult<OkResponse>;

    /// Move the read cursor of a channel, group or IM
    async fn mark(&self, channel: &ChannelId, ts: &Timestamp) -> SlackResult<OkResponse>;

    /// Rename a channel or group
    async fn rename(&self, channel: &ChannelId, name: &str) -> SlackResult<RenameResponse>;

    /// Set the purpose of a channel or group
    async fn set_purpose(&self, channel: &ChannelId, purpose: &str) -> SlackResult<PurposeResponse>;

    /// Set the topic of a channel or group
    async fn set_topic(&self, channel: &ChannelId, topic: &str) -> SlackResult<TopicResponse>;

    /// Close a group or IM
    async fn close(&self, channel: &ChannelId) -> SlackResult<OpenCloseResponse>;

    /// Open a group or IM
    async fn open(&self, channel: &ChannelId) -> SlackResult<OpenCloseResponse>;

    /// Create a channel
    async fn create_channel(&self, name: &str) -> SlackResult<ChannelResponse>;

    /// Invite a user to a channel
    async fn invite_to_channel(&self, channel: &ChannelId, user: &UserId) -> SlackResult<ChannelResponse>;

    /// Get channel info
    async fn channel_info(&self, channel: &ChannelId) -> SlackResult<ChannelResponse>;

    /// List channels
    async fn list_channels(&self, exclude_archived: bool) -> SlackResult<ChannelListResponse>;

    /// Join a channel by name
    async fn join_channel(&self, name: &str) -> SlackResult<ChannelResponse>;

    /// Create a private group
    async fn create_group(&self, name: &str) -> SlackResult<GroupResponse>;

    /// Archive a group and create a copy of it
    async fn create_child_group(&self, group: &ChannelId) -> SlackResult<GroupResponse>;

    /// Get group info
    async fn group_info(&self, group: &ChannelId) -> SlackResult<GroupResponse>;

    /// Invite a user to a group
    async fn invite_to_group(&self, group: &ChannelId, user: &UserId) -> SlackResult<GroupResponse>;

    /// List groups
    async fn list_groups(&self, exclude_archived: bool) -> SlackResult<GroupListResponse>;

    /// List IMs
    async fn list_ims(&self) -> SlackResult<ImListResponse>;
}

/// Conversations service implementation
#[derive(Clone)]
pub struct ConversationsService {
    invoker: Arc<ApiInvoker>,
}

impl ConversationsService {
    /// Create a new conversations service
    pub fn new(invoker: Arc<ApiInvoker>) -> Self {
        Self { invoker }
    }

    fn channel_params(channel: &ChannelId) -> Params {
        Params::new().set("channel", channel.as_str())
    }
}

#[async_trait]
impl ConversationsServiceTrait for ConversationsService {
    #[instrument(skip(self), fields(channel = %channel))]
    async fn archive(&self, channel: &ChannelId) -> SlackResult<OkResponse> {
        self.invoker
            .call(&channel.method("archive"), Self::channel_params(channel))
            .await
    }

    #[instrument(skip(self), fields(channel = %channel))]
    async fn unarchive(&self, channel: &ChannelId) -> SlackResult<OkResponse> {
        self.invoker
            .call(&channel.method("unarchive"), Self::channel_params(channel))
            .await
    }

    #[instrument(skip(self, request), fields(channel = %request.channel))]
    async fn history(&self, request: HistoryRequest) -> SlackResult<HistoryResponse> {
        self.invoker
            .call(&request.channel.method("history"), request.to_params())
            .await
    }

    #[instrument(skip(self), fields(channel = %channel, user = %user))]
    async fn kick(&self, channel: &ChannelId, user: &UserId) -> SlackResult<OkResponse> {
        let params = Self::channel_params(channel).set("user", user.as_str());
        self.invoker.call(&channel.method("kick"), params).await
    }

    #[instrument(skip(self), fields(channel = %channel))]
    async fn leave(&self, channel: &ChannelId) -> SlackResult<OkResponse> {
        self.invoker
            .call(&channel.method("leave"), Self::channel_params(channel))
            .await
    }

    #[instrument(skip(self), fields(channel = %channel, ts = %ts))]
    async fn mark(&self, channel: &ChannelId, ts: &Timestamp) -> SlackResult<OkResponse> {
        let params = Self::channel_params(channel).set("ts", ts.as_str());
        self.invoker.call(&channel.method("mark"), params).await
    }

    #[instrument(skip(self), fields(channel = %channel))]
    async fn rename(&self, channel: &ChannelId, name: &str) -> SlackResult<RenameResponse> {
        let params = Self::channel_params(channel).set("name", name);
        self.invoker.call(&channel.method("rename"), params).await
    }

    #[instrument(skip(self), fields(channel = %channel))]
    async fn set_purpose(&self, channel: &ChannelId, purpose: &str) -> SlackResult<PurposeResponse> {
        let params = Self::channel_params(channel).set("purpose", purpose);
        self.invoker.call(&channel.method("setPurpose"), params).await
    }

    #[instrument(skip(self), fields(channel = %channel))]
    async fn set_topic(&self, channel: &ChannelId, topic: &str) -> SlackResult<TopicResponse> {
        let params = Self::channel_params(channel).set("topic", topic);
        self.invoker.call(&channel.method("setTopic"), params).await
    }

    #[instrument(skip(self), fields(channel = %channel))]
    async fn close(&self, channel: &ChannelId) -> SlackResult<OpenCloseResponse> {
        self.invoker
            .call(&channel.method("close"), Self::channel_params(channel))
            .await
    }

    #[instrument(skip(self), fields(channel = %channel))]
    async fn open(&self, channel: &ChannelId) -> SlackResult<OpenCloseResponse> {
        self.invoker
            .call(&channel.method("open"), Self::channel_params(channel))
            .await
    }

    #[instrument(skip(self))]
    async fn create_channel(&self, name: &str) -> SlackResult<ChannelResponse> {
        self.invoker
            .call("channels.create", Params::new().set("name", name))
            .await
    }

    #[instrument(skip(self), fields(channel = %channel, user = %user))]
    async fn invite_to_channel(&self, channel: &ChannelId, user: &UserId) -> SlackResult<ChannelResponse> {
        let params = Self::channel_params(channel).set("user", user.as_str());
        self.invoker.call("channels.invite", params).await
    }

    #[instrument(skip(self), fields(channel = %channel))]
    async fn channel_info(&self, channel: &ChannelId) -> SlackResult<ChannelResponse> {
        self.invoker
            .call("channels.info", Self::channel_params(channel))
            .await
    }

    #[instrument(skip(self))]
    async fn list_channels(&self, exclude_archived: bool) -> SlackResult<ChannelListResponse> {
        self.invoker
            .call("channels.list", Params::new().flag("exclude_archived", exclude_archived))
            .await
    }

    #[instrument(skip(self))]
    async fn join_channel(&self, name: &str) -> SlackResult<ChannelResponse> {
        self.invoker
            .call("channels.join", Params::new().set("name", name))
            .await
    }

    #[instrument(skip(self))]
    async fn create_group(&self, name: &str) -> SlackResult<GroupResponse> {
        self.invoker
            .call("groups.create", Params::new().set("name", name))
            .await
    }

    #[instrument(skip(self), fields(group = %group))]
    async fn create_child_group(&self, group: &ChannelId) -> SlackResult<GroupResponse> {
        self.invoker
            .call("groups.createChild", Self::channel_params(group))
            .await
    }

    #[instrument(skip(self), fields(group = %group))]
    async fn group_info(&self, group: &ChannelId) -> SlackResult<GroupResponse> {
        self.invoker
            .call("groups.info", Self::channel_params(group))
            .await
    }

    #[instrument(skip(self), fields(group = %group, user = %user))]
    async fn invite_to_group(&self, group: &ChannelId, user: &UserId) -> SlackResult<GroupResponse> {
        let params = Self::channel_params(group).set("user", user.as_str());
        self.invoker.call("groups.invite", params).await
    }

    #[instrument(skip(self))]
    async fn list_groups(&self, exclude_archived: bool) -> SlackResult<GroupListResponse> {
        self.invoker
            .call("groups.list", Params::new().flag("exclude_archived", exclude_archived))
            .await
    }

    #[instrument(skip(self))]
    async fn list_ims(&self) -> SlackResult<ImListResponse> {
        self.invoker.call("im.list", Params::new()).await
    }
}

#[async_trait]
impl ChannelMarker for ConversationsService {
    async fn mark(&self, channel: &ChannelId, ts: &Timestamp) -> SlackResult<()> {
        ConversationsServiceTrait::mark(self, channel, ts).await.map(|_| ())
    }
}
