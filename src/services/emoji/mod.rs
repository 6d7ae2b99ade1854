//! Emoji service for Slack API.

use crate::client::{ApiInvoker, Params};
use crate::errors::SlackResult;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

/// Response from emoji.list
#[derive(Debug, Clone, Deserialize)]
pub struct EmojiListResponse {
    /// Success indicator
    pub ok: bool,
    /// Custom emoji name to image URL, or `alias:<name>`
    #[serde(default)]
    pub emoji: HashMap<String, String>,
}

/// Trait for emoji service operations
#[async_trait]
pub trait EmojiServiceTrait: Send + Sync {
    /// List the team's custom emoji
    async fn list(&self) -> SlackResult<EmojiListResponse>;
}

/// Emoji service implementation
#[derive(Clone)]
pub struct EmojiService {
    invoker: Arc<ApiInvoker>,
}

impl EmojiService {
    /// Create a new emoji service
    pub fn new(invoker: Arc<ApiInvoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl EmojiServiceTrait for EmojiService {
    #[instrument(skip(self))]
    async fn list(&self) -> SlackResult<EmojiListResponse> {
        self.invoker.call("emoji.list", Params::new()).await
    }
}
