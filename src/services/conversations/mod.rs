//! Conversations service for Slack API.
//!
//! Channels, private groups and IMs. Operations that exist in all three
//! families are routed by identifier prefix: `C…` to `channels.*`, `G…` to
//! `groups.*`, `D…` to `im.*`.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;
