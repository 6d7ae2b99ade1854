//! Service implementations for Slack API endpoints.
//!
//! Each service module provides methods for interacting with a specific
//! category of Slack API endpoints. All of them go through one
//! [`ApiInvoker`](crate::client::ApiInvoker).

pub mod auth_service;
pub mod conversations;
pub mod emoji;
pub mod files;
pub mod messages;
pub mod reactions;
pub mod team;
pub mod users;

pub use auth_service::{AuthService, AuthServiceTrait};
pub use conversations::{ConversationsService, ConversationsServiceTrait};
pub use emoji::{EmojiService, EmojiServiceTrait};
pub use files::{FilesService, FilesServiceTrait};
pub use messages::{MessagesService, MessagesServiceTrait};
pub use reactions::{ReactionsService, ReactionsServiceTrait};
pub use team::{TeamService, TeamServiceTrait};
pub use users::{UsersService, UsersServiceTrait};
