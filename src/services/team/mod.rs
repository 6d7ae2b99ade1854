//! Team service for Slack API.

mod responses;
mod service;

pub use responses::*;
pub use service::*;
