//! Team service implementation.

use super::*;
use crate::client::{ApiInvoker, Params};
use crate::errors::SlackResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for team service operations
#[async_trait]
pub trait TeamServiceTrait: Send + Sync {
    /// Get information about the current team
    async fn info(&self) -> SlackResult<TeamInfoResponse>;
}

/// Team service implementation
#[derive(Clone)]
pub struct TeamService {
    invoker: Arc<ApiInvoker>,
}

impl TeamService {
    /// Create a new team service
    pub fn new(invoker: Arc<ApiInvoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl TeamServiceTrait for TeamService {
    #[instrument(skip(self))]
    async fn info(&self) -> SlackResult<TeamInfoResponse> {
        self.invoker.call("team.info", Params::new()).await
    }
}
