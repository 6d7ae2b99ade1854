//! Error types for the Slack client.
//!
//! Maps Slack API error codes onto a typed hierarchy. Every failure the
//! server declares keeps the server's error string in its message, and
//! [`SlackError::api_code`] hands the raw code back to callers.

use std::time::Duration;
use thiserror::Error;

/// Result type for Slack operations
pub type SlackResult<T> = Result<T, SlackError>;

/// Root error type for the Slack client
#[derive(Error, Debug)]
pub enum SlackError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// Authorization error
    #[error("Authorization error: {0}")]
    Authorization(#[from] AuthorizationError),

    /// Request validation error
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Rate limit error
    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Real Time Messaging error
    #[error("RTM error: {0}")]
    Rtm(#[from] RtmError),

    /// Server error
    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// Response parsing error
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Channel-related error
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Any other error code returned by the API
    #[error("API error: {code} - {message}")]
    Api {
        /// Slack error code
        code: String,
        /// Error message
        message: String,
    },
}

impl SlackError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "SLACK_CONFIG",
            Self::Authentication(_) => "SLACK_AUTH",
            Self::Authorization(_) => "SLACK_AUTHZ",
            Self::Request(_) => "SLACK_REQUEST",
            Self::RateLimit(_) => "SLACK_RATE_LIMIT",
            Self::Network(_) => "SLACK_NETWORK",
            Self::Rtm(_) => "SLACK_RTM",
            Self::Server(_) => "SLACK_SERVER",
            Self::Response(_) => "SLACK_RESPONSE",
            Self::Channel(_) => "SLACK_CHANNEL",
            Self::Api { .. } => "SLACK_API",
        }
    }

    /// The error string the Slack API returned, if this error came from an
    /// `"ok": false` response.
    pub fn api_code(&self) -> Option<&str> {
        let code = match self {
            Self::Authentication(e) => e.code(),
            Self::Authorization(AuthorizationError::NotAuthed) => "not_authed",
            Self::Authorization(AuthorizationError::MissingScope { .. }) => "missing_scope",
            Self::Authorization(AuthorizationError::ChannelNotFound) => "channel_not_found",
            Self::Authorization(AuthorizationError::UserNotFound) => "user_not_found",
            Self::Authorization(AuthorizationError::NotInChannel) => "not_in_channel",
            Self::Request(RequestError::InvalidArguments { .. }) => "invalid_arguments",
            Self::Request(RequestError::MessageTooLong) => "msg_too_long",
            Self::RateLimit(RateLimitError::Ratelimited) => "ratelimited",
            Self::Channel(ChannelError::ChannelArchived) => "is_archived",
            Self::Channel(ChannelError::AlreadyInChannel) => "already_in_channel",
            Self::Server(ServerError::InternalError) => "internal_error",
            Self::Server(ServerError::ServiceUnavailable) => "service_unavailable",
            Self::Api { code, .. } => code.as_str(),
            _ => return None,
        };
        Some(code)
    }

    /// Get retry-after duration if applicable
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit(RateLimitError::RateLimited { retry_after }) => Some(*retry_after),
            _ => None,
        }
    }

    /// Get HTTP status code if applicable
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Network(NetworkError::HttpStatus { status }) => Some(*status),
            Self::RateLimit(RateLimitError::RateLimited { .. }) => Some(429),
            _ => None,
        }
    }

    /// Create an error from the `error` field of an `"ok": false` response
    pub fn from_slack_error(code: &str, message: Option<&str>) -> Self {
        let msg = message.unwrap_or(code).to_string();

        match code {
            "invalid_auth" => Self::Authentication(AuthenticationError::InvalidAuth),
            "account_inactive" => Self::Authentication(AuthenticationError::AccountInactive),
            "token_revoked" => Self::Authentication(AuthenticationError::TokenRevoked),
            "invalid_client_id" => Self::Authentication(AuthenticationError::InvalidClientId),
            "bad_client_secret" => Self::Authentication(AuthenticationError::BadClientSecret),
            "invalid_code" => Self::Authentication(AuthenticationError::InvalidCode),
            "not_authed" => Self::Authorization(AuthorizationError::NotAuthed),
            "missing_scope" => Self::Authorization(AuthorizationError::MissingScope { scope: msg }),
            "channel_not_found" => Self::Authorization(AuthorizationError::ChannelNotFound),
            "user_not_found" => Self::Authorization(AuthorizationError::UserNotFound),
            "not_in_channel" => Self::Authorization(AuthorizationError::NotInChannel),
            "invalid_arguments" => Self::Request(RequestError::InvalidArguments { message: msg }),
            "msg_too_long" => Self::Request(RequestError::MessageTooLong),
            "ratelimited" => Self::RateLimit(RateLimitError::Ratelimited),
            "is_archived" => Self::Channel(ChannelError::ChannelArchived),
            "already_in_channel" => Self::Channel(ChannelError::AlreadyInChannel),
            "internal_error" => Self::Server(ServerError::InternalError),
            "service_unavailable" => Self::Server(ServerError::ServiceUnavailable),
            _ => Self::Api {
                code: code.to_string(),
                message: msg,
            },
        }
    }

    /// Shorthand for a pre-flight validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Request(RequestError::Validation {
            message: message.into(),
        })
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Missing token
    #[error("Token is missing")]
    MissingToken,

    /// Invalid token format
    #[error("Invalid token format: {0}")]
    InvalidToken(String),

    /// Incomplete OAuth credentials
    #[error("Invalid OAuth credentials: {0} is required")]
    InvalidOAuthCredentials(&'static str),

    /// Invalid base URL
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(String),
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthenticationError {
    /// Invalid authentication credentials
    #[error("invalid_auth: invalid authentication credentials")]
    InvalidAuth,

    /// Account is inactive
    #[error("account_inactive: account is inactive")]
    AccountInactive,

    /// Token has been revoked
    #[error("token_revoked: token has been revoked")]
    TokenRevoked,

    /// OAuth client id was not recognised
    #[error("invalid_client_id: OAuth client id was not recognised")]
    InvalidClientId,

    /// OAuth client secret did not match
    #[error("bad_client_secret: OAuth client secret did not match")]
    BadClientSecret,

    /// OAuth code was invalid or already used
    #[error("invalid_code: OAuth code is invalid or expired")]
    InvalidCode,
}

impl AuthenticationError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidAuth => "invalid_auth",
            Self::AccountInactive => "account_inactive",
            Self::TokenRevoked => "token_revoked",
            Self::InvalidClientId => "invalid_client_id",
            Self::BadClientSecret => "bad_client_secret",
            Self::InvalidCode => "invalid_code",
        }
    }
}

/// Authorization errors
#[derive(Error, Debug)]
pub enum AuthorizationError {
    /// Not authenticated
    #[error("not_authed: no authentication token provided")]
    NotAuthed,

    /// Missing required scope
    #[error("missing_scope: {scope}")]
    MissingScope {
        /// The missing scope
        scope: String,
    },

    /// Channel not found
    #[error("channel_not_found: channel not found")]
    ChannelNotFound,

    /// User not found
    #[error("user_not_found: user not found")]
    UserNotFound,

    /// Not in channel
    #[error("not_in_channel: not in channel")]
    NotInChannel,
}

/// Request errors
#[derive(Error, Debug)]
pub enum RequestError {
    /// Rejected locally before any network call
    #[error("{message}")]
    Validation {
        /// Error message
        message: String,
    },

    /// Invalid arguments
    #[error("invalid_arguments: {message}")]
    InvalidArguments {
        /// Error message
        message: String,
    },

    /// Invalid form data
    #[error("Invalid form data: {message}")]
    InvalidFormData {
        /// Error message
        message: String,
    },

    /// Message too long
    #[error("msg_too_long: message is too long")]
    MessageTooLong,
}

/// Rate limit errors
#[derive(Error, Debug)]
pub enum RateLimitError {
    /// HTTP 429 with retry information
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Duration to wait before retrying
        retry_after: Duration,
    },

    /// `"ok": false` with the `ratelimited` code
    #[error("ratelimited: too many requests")]
    Ratelimited,
}

/// Network errors
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Non-success HTTP status
    #[error("http_error: unexpected status {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            NetworkError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            NetworkError::Http(err.to_string())
        }
    }
}

/// Real Time Messaging errors
#[derive(Error, Debug)]
pub enum RtmError {
    /// No connection is open
    #[error("RTM channel is not open")]
    ConnectionNotOpen,

    /// Dial failed
    #[error("Failed to connect: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// `rtm.start` returned no socket URL
    #[error("rtm.start returned no WebSocket URL")]
    MissingUrl,

    /// Origin header value could not be encoded
    #[error("Invalid origin header: {0}")]
    InvalidOrigin(String),

    /// WebSocket error
    #[error("WebSocket error: {message}")]
    WebSocket {
        /// Error message
        message: String,
    },
}

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Internal server error
    #[error("internal_error: internal server error")]
    InternalError,

    /// Service unavailable
    #[error("service_unavailable: service unavailable")]
    ServiceUnavailable,
}

/// Response parsing errors
#[derive(Error, Debug)]
pub enum ResponseError {
    /// JSON deserialization error
    #[error("Deserialization error: {message}")]
    DeserializationError {
        /// Error message
        message: String,
    },

    /// Missing "ok" field
    #[error("Missing 'ok' field in response")]
    MissingOkField,
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::DeserializationError {
            message: err.to_string(),
        }
    }
}

/// Channel errors
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Channel is archived
    #[error("is_archived: channel is archived")]
    ChannelArchived,

    /// Already in channel
    #[error("already_in_channel: already in channel")]
    AlreadyInChannel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slack_error() {
        assert!(matches!(
            SlackError::from_slack_error("invalid_auth", None),
            SlackError::Authentication(AuthenticationError::InvalidAuth)
        ));

        assert!(matches!(
            SlackError::from_slack_error("channel_not_found", None),
            SlackError::Authorization(AuthorizationError::ChannelNotFound)
        ));

        assert!(matches!(
            SlackError::from_slack_error("unknown_error", Some("test")),
            SlackError::Api { code, message } if code == "unknown_error" && message == "test"
        ));
    }

    #[test]
    fn test_server_code_survives_display() {
        for code in [
            "invalid_auth",
            "not_authed",
            "channel_not_found",
            "is_archived",
            "ratelimited",
            "no_such_method",
        ] {
            let err = SlackError::from_slack_error(code, None);
            assert!(err.to_string().contains(code), "{code}: {err}");
            assert_eq!(err.api_code(), Some(code));
        }
    }

    #[test]
    fn test_local_errors_have_no_api_code() {
        assert_eq!(SlackError::validation("provide the emoji name").api_code(), None);
        assert_eq!(SlackError::Rtm(RtmError::ConnectionNotOpen).api_code(), None);
        assert_eq!(
            SlackError::Network(NetworkError::HttpStatus { status: 502 }).http_status(),
            Some(502)
        );
    }

    #[test]
    fn test_retry_after() {
        let err = SlackError::RateLimit(RateLimitError::RateLimited {
            retry_after: Duration::from_secs(10),
        });
        assert_eq!(err.retry_after(), Some(Duration::from_secs(10)));

        let err2 = SlackError::Network(NetworkError::Timeout);
        assert_eq!(err2.retry_after(), None);
    }
}
