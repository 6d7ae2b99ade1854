//! Real Time Messaging.
//!
//! [`RtmClient::connect`] opens a session and returns an [`RtmHandle`]
//! whose event receiver survives reconnections:
//!
//! ```text
//! socket -> reader (decode, normalize) -> supervisor -> consumer
//!                                             |
//!                                        read markers -> *.mark
//! ```
//!
//! The decoder, team context and batcher have no socket dependency and are
//! available without the `rtm` feature.

#[cfg(feature = "rtm")]
mod client;
mod context;
mod decoder;
mod event;
mod read_marker;
#[cfg(feature = "rtm")]
mod session;
mod supervisor;
mod types;

#[cfg(feature = "rtm")]
pub use client::{RtmClient, RtmHandle};
pub use context::{TeamContext, TeamSnapshot};
pub use decoder::{decode, DecodeError, CHANNEL_EVENTS, USER_EVENTS};
pub use event::{EventContext, EventError, NestedMessage, UnifiedEvent, ERROR_KIND};
pub use read_marker::{ChannelMarker, ReadMarker, ReadMarkerBatcher};
#[cfg(feature = "rtm")]
pub use session::RtmSession;
pub use supervisor::{ConnectionStatus, EventSource, Supervisor};
pub use types::{RtmSelf, RtmStartResponse};

pub use crate::config::ParseFailurePolicy;
