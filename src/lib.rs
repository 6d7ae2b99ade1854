//! Slack API client with a Real Time Messaging session.
//!
//! - Web API calls through one invoker (`auth.test`, `chat.postMessage`,
//!   channel/group/IM operations, users, team, emoji, reactions, files)
//! - An RTM event stream that decodes and normalizes frames, reconnects on
//!   connection loss and batches read markers
//! - Structured logging through `tracing` and in-process counters
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use slack_rtm::SlackClient;
//! use slack_rtm::services::messages::PostMessageRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = slack_rtm::create_client_from_env()?;
//!
//!     let response = client
//!         .messages()
//!         .post(PostMessageRequest::new("C024BE91L", "Hello, Slack!"))
//!         .await?;
//!     println!("Message posted: {}", response.ts);
//!
//!     let mut rtm = client.rtm().connect().await?;
//!     while let Some(event) = rtm.recv().await {
//!         if event.is_message() {
//!             println!("{}: {}", event.user, event.text);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `rtm` - WebSocket session, supervisor wiring and [`rtm::RtmClient`] (default)
//! - `full` - Enable all features

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;

// Services
pub mod services;

// Real Time Messaging
pub mod rtm;

// Observability
pub mod observability;

// Testing utilities
#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use client::{ApiInvoker, Params, SlackClient, SlackClientImpl};
pub use config::{ParseFailurePolicy, RtmConfig, SlackConfig, SlackConfigBuilder};
pub use errors::{SlackError, SlackResult};
pub use rtm::{ConnectionStatus, UnifiedEvent};
#[cfg(feature = "rtm")]
pub use rtm::{RtmClient, RtmHandle};

/// Default base URL for Slack API
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api/";

/// Default timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default wait between RTM reconnection attempts, in seconds
pub const DEFAULT_RECONNECT_DELAY_SECS: u64 = 60;

/// Default read marker flush interval, in seconds
pub const DEFAULT_MARK_INTERVAL_SECS: u64 = 5;

/// Create a Slack client with the given configuration
pub fn create_client(config: SlackConfig) -> SlackResult<SlackClientImpl> {
    SlackClientImpl::new(config)
}

/// Create a Slack client from environment variables
///
/// Reads:
/// - `SLACK_TOKEN` - API token
/// - `SLACK_BASE_URL` - API base URL
/// - `SLACK_TIMEOUT` - Request timeout in seconds
/// - `SLACK_RTM_ORIGIN` - `Origin` header for the RTM handshake
/// - `SLACK_RTM_RECONNECT_SECS` - Wait between reconnection attempts
/// - `SLACK_RTM_MARK_SECS` - Read marker flush interval
///
/// OAuth credentials (`SLACK_CLIENT_ID`, `SLACK_CLIENT_SECRET`,
/// `SLACK_OAUTH_CODE`) need the async [`SlackClientImpl::build`].
pub fn create_client_from_env() -> SlackResult<SlackClientImpl> {
    let config = SlackConfig::from_env()?;
    create_client(config)
}
