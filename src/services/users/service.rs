//! Users service implementation.

use super::*;
use crate::client::{ApiInvoker, Params};
use crate::errors::SlackResult;
use crate::types::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for users service operations
#[async_trait]
pub trait UsersServiceTrait: Send + Sync {
    /// Get information about a user
    async fn info(&self, user: &UserId) -> SlackResult<GetUserResponse>;

    /// Invite someone to the workspace. Needs an admin token.
    async fn invite(&self, request: InviteRequest) -> SlackResult<InviteResponse>;
}

/// Users service implementation
#[derive(Clone)]
pub struct UsersService {
    invoker: Arc<ApiInvoker>,
}

impl UsersService {
    /// Create a new users service
    pub fn new(invoker: Arc<ApiInvoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl UsersServiceTrait for UsersService {
    #[instrument(skip(self), fields(user = %user))]
    async fn info(&self, user: &UserId) -> SlackResult<GetUserResponse> {
        self.invoker
            .call("users.info", Params::new().set("user", user.as_str()))
            .await
    }

    #[instrument(skip(self, request), fields(invitee_type = ?request.invitee_type))]
    async fn invite(&self, request: InviteRequest) -> SlackResult<InviteResponse> {
        let params = request.to_params()?;
        self.invoker.call("users.admin.invite", params).await
    }
}
