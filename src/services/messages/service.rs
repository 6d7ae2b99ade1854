//! Messages service implementation.

use super::*;
use crate::client::ApiInvoker;
use crate::errors::SlackResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for messages service operations
#[async_trait]
pub trait MessagesServiceTrait: Send + Sync {
    /// Post a message to a channel
    async fn post(&self, request: PostMessageRequest) -> SlackResult<PostMessageResponse>;
}

/// Messages service implementation
#[derive(Clone)]
pub struct MessagesService {
    invoker: Arc<ApiInvoker>,
}

impl MessagesService {
    /// Create a new messages service
    pub fn new(invoker: Arc<ApiInvoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl MessagesServiceTrait for MessagesService {
    #[instrument(skip(self, request), fields(channel = %request.channel))]
    async fn post(&self, request: PostMessageRequest) -> SlackResult<PostMessageResponse> {
        let params = request.to_params()?;
        self.invoker.call("chat.postMessage", params).await
    }
}
