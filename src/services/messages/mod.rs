//! Messages service for Slack API.
//!
//! Posting messages with `chat.postMessage`.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;
