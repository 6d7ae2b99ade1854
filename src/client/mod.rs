//! Slack client implementation.
//!
//! Provides the main entry point for interacting with Slack APIs.

mod invoker;

pub use invoker::{ApiInvoker, Params};

use crate::config::{SlackConfig, SlackToken};
use crate::errors::{ConfigurationError, SlackError, SlackResult};
use crate::observability::RtmMetrics;
use crate::services::auth_service::OAuthAccessRequest;
use crate::services::{
    AuthService, AuthServiceTrait, ConversationsService, EmojiService, FilesService,
    MessagesService, ReactionsService, TeamService, UsersService,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;
use tracing::info;

/// Trait defining the Slack client interface
pub trait SlackClient: Send + Sync {
    /// Get the configuration
    fn config(&self) -> &SlackConfig;

    /// The invoker all services share
    fn invoker(&self) -> &Arc<ApiInvoker>;

    /// Shared counters
    fn metrics(&self) -> &Arc<RtmMetrics> {
        self.invoker().metrics()
    }

    /// Get the auth service
    fn auth(&self) -> &dyn crate::services::auth_service::AuthServiceTrait;

    /// Get the conversations service
    fn conversations(&self) -> &dyn crate::services::conversations::ConversationsServiceTrait;

    /// Get the messages service
    fn messages(&self) -> &dyn crate::services::messages::MessagesServiceTrait;

    /// Get the users service
    fn users(&self) -> &dyn crate::services::users::UsersServiceTrait;

    /// Get the team service
    fn team(&self) -> &dyn crate::services::team::TeamServiceTrait;

    /// Get the emoji service
    fn emoji(&self) -> &dyn crate::services::emoji::EmojiServiceTrait;

    /// Get the reactions service
    fn reactions(&self) -> &dyn crate::services::reactions::ReactionsServiceTrait;

    /// Get the files service
    fn files(&self) -> &dyn crate::services::files::FilesServiceTrait;
}

/// Main Slack client implementation
#[derive(Clone)]
pub struct SlackClientImpl {
    invoker: Arc<ApiInvoker>,
    auth_service: AuthService,
    conversations_service: ConversationsService,
    messages_service: MessagesService,
    users_service: UsersService,
    team_service: TeamService,
    emoji_service: EmojiService,
    reactions_service: ReactionsService,
    files_service: FilesService,
}

impl SlackClientImpl {
    /// Create a new Slack client. The configuration must carry a token; use
    /// [`SlackClientImpl::build`] to exchange OAuth credentials first.
    pub fn new(config: SlackConfig) -> SlackResult<Self> {
        if config.token().is_none() {
            return Err(SlackError::Configuration(ConfigurationError::MissingToken));
        }
        let transport = Arc::new(ReqwestTransport::new(config.timeout)?);
        Self::with_transport(config, transport)
    }

    /// Create a new Slack client with a custom transport
    pub fn with_transport(
        config: SlackConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> SlackResult<Self> {
        let invoker = Arc::new(ApiInvoker::new(
            Arc::new(config),
            transport,
            Arc::new(RtmMetrics::new()),
        ));

        Ok(Self {
            auth_service: AuthService::new(invoker.clone()),
            conversations_service: ConversationsService::new(invoker.clone()),
            messages_service: MessagesService::new(invoker.clone()),
            users_service: UsersService::new(invoker.clone()),
            team_service: TeamService::new(invoker.clone()),
            emoji_service: EmojiService::new(invoker.clone()),
            reactions_service: ReactionsService::new(invoker.clone()),
            files_service: FilesService::new(invoker.clone()),
            invoker,
        })
    }

    /// Create a client, exchanging the configured OAuth code for a token
    /// when no token is set.
    pub async fn build(config: SlackConfig) -> SlackResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout)?);
        Self::build_with_transport(config, transport).await
    }

    /// [`SlackClientImpl::build`] over a custom transport
    pub async fn build_with_transport(
        config: SlackConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> SlackResult<Self> {
        if config.token().is_some() {
            return Self::with_transport(config, transport);
        }
        let request = match config.oauth() {
            Some(creds) => OAuthAccessRequest::from(creds),
            None => return Err(SlackError::Configuration(ConfigurationError::MissingToken)),
        };

        let exchange = Self::with_transport(config.clone(), transport.clone())?;
        let response = exchange.auth_service.oauth_access(request).await?;
        info!(team = %response.team_name, scope = %response.scope, "OAuth code exchanged");

        let config = config.with_token(SlackToken::new(response.access_token)?);
        Self::with_transport(config, transport)
    }

    /// Call any API method and get the verified JSON body
    pub async fn invoke(&self, method: &str, params: Params) -> SlackResult<serde_json::Value> {
        self.invoker.invoke(method, params).await
    }

    /// Build a full URL for an API method
    pub fn build_url(&self, method: &str) -> String {
        self.invoker.config().build_url(method)
    }

    /// Real Time Messaging client sharing this client's invoker
    #[cfg(feature = "rtm")]
    pub fn rtm(&self) -> crate::rtm::RtmClient {
        crate::rtm::RtmClient::new(self.invoker.clone())
    }
}

impl SlackClient for SlackClientImpl {
    fn config(&self) -> &SlackConfig {
        self.invoker.config()
    }

    fn invoker(&self) -> &Arc<ApiInvoker> {
        &self.invoker
    }

    fn auth(&self) -> &dyn crate::services::auth_service::AuthServiceTrait {
        &self.auth_service
    }

    fn conversations(&self) -> &dyn crate::services::conversations::ConversationsServiceTrait {
        &self.conversations_service
    }

    fn messages(&self) -> &dyn crate::services::messages::MessagesServiceTrait {
        &self.messages_service
    }

    fn users(&self) -> &dyn crate::services::users::UsersServiceTrait {
        &self.users_service
    }

    fn team(&self) -> &dyn crate::services::team::TeamServiceTrait {
        &self.team_service
    }

    fn emoji(&self) -> &dyn crate::services::emoji::EmojiServiceTrait {
        &self.emoji_service
    }

    fn reactions(&self) -> &dyn crate::services::reactions::ReactionsServiceTrait {
        &self.reactions_service
    }

    fn files(&self) -> &dyn crate::services::files::FilesServiceTrait {
        &self.files_service
    }
}

impl std::fmt::Debug for SlackClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClientImpl")
            .field("invoker", &self.invoker)
            .finish()
    }
}
