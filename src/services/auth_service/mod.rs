//! Auth service for Slack API.
//!
//! Token checks and the OAuth code exchange.

use crate::client::{ApiInvoker, Params};
use crate::config::OAuthCredentials;
use crate::errors::SlackResult;
use crate::types::{TeamId, UserId};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

/// Response from auth.test
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTestResponse {
    /// Success indicator
    pub ok: bool,
    /// URL of the workspace
    #[serde(default)]
    pub url: String,
    /// Team name
    #[serde(default)]
    pub team: String,
    /// User name
    #[serde(default)]
    pub user: String,
    /// Team ID
    #[serde(default)]
    pub team_id: TeamId,
    /// User ID
    #[serde(default)]
    pub user_id: UserId,
}

/// Request for oauth.access
#[derive(Clone)]
pub struct OAuthAccessRequest {
    /// Client ID
    pub client_id: String,
    /// Client secret
    pub client_secret: SecretString,
    /// Authorization code
    pub code: String,
    /// Redirect URI used in the authorization step
    pub redirect_uri: Option<String>,
}

impl OAuthAccessRequest {
    /// Create a new request
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
            code: code.into(),
            redirect_uri: None,
        }
    }

    /// Set redirect URI
    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    fn params(&self) -> Params {
        Params::new()
            .set("client_id", self.client_id.as_str())
            .set("client_secret", self.client_secret.expose_secret().as_str())
            .set("code", self.code.as_str())
            .set_opt("redirect_uri", self.redirect_uri.as_deref())
    }
}

impl From<&OAuthCredentials> for OAuthAccessRequest {
    fn from(creds: &OAuthCredentials) -> Self {
        Self {
            client_id: creds.client_id.clone(),
            client_secret: creds.client_secret.clone(),
            code: creds.code.clone(),
            redirect_uri: creds.redirect_uri.clone(),
        }
    }
}

impl std::fmt::Debug for OAuthAccessRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthAccessRequest")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Incoming webhook created during an OAuth install
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingWebhook {
    /// Webhook URL
    #[serde(default)]
    pub url: String,
    /// Channel name
    #[serde(default)]
    pub channel: String,
    /// Configuration page
    #[serde(default)]
    pub configuration_url: String,
}

/// Bot user created during an OAuth install
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthBot {
    /// Bot user ID
    #[serde(default)]
    pub bot_user_id: UserId,
    /// Bot token
    #[serde(default)]
    pub bot_access_token: String,
}

/// Response from oauth.access
#[derive(Clone, Deserialize)]
pub struct OAuthAccessResponse {
    /// Success indicator
    pub ok: bool,
    /// Access token
    pub access_token: String,
    /// Granted scopes
    #[serde(default)]
    pub scope: String,
    /// Team name
    #[serde(default)]
    pub team_name: String,
    /// Team ID
    #[serde(default)]
    pub team_id: TeamId,
    /// Incoming webhook, when requested
    #[serde(default)]
    pub incoming_webhook: Option<IncomingWebhook>,
    /// Bot user, when requested
    #[serde(default)]
    pub bot: Option<OAuthBot>,
}

impl std::fmt::Debug for OAuthAccessResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthAccessResponse")
            .field("access_token", &crate::observability::redact_token(&self.access_token))
            .field("scope", &self.scope)
            .field("team_name", &self.team_name)
            .field("team_id", &self.team_id)
            .finish()
    }
}

/// Trait for auth service operations
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    /// Check the configured token
    async fn test(&self) -> SlackResult<AuthTestResponse>;

    /// Exchange an OAuth code for an access token. Sent without a token.
    async fn oauth_access(&self, request: OAuthAccessRequest) -> SlackResult<OAuthAccessResponse>;
}

/// Auth service implementation
#[derive(Clone)]
pub struct AuthService {
    invoker: Arc<ApiInvoker>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(invoker: Arc<ApiInvoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    #[instrument(skip(self))]
    async fn test(&self) -> SlackResult<AuthTestResponse> {
        self.invoker.call("auth.test", Params::new()).await
    }

    #[instrument(skip(self, request), fields(client_id = %request.client_id))]
    async fn oauth_access(&self, request: OAuthAccessRequest) -> SlackResult<OAuthAccessResponse> {
        self.invoker
            .call_unauthenticated("oauth.access", request.params())
            .await
    }
}
