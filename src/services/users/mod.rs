//! Users service for Slack API.
//!
//! User lookup and workspace invitations.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;
