//! Team roster shared by the session and its consumers.

use super::event::UnifiedEvent;
use super::types::RtmStartResponse;
use crate::types::{ChannelId, Team, UserId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Point-in-time copy of the roster
#[derive(Debug, Clone, Default)]
pub struct TeamSnapshot {
    /// Connecting user
    pub self_id: UserId,
    /// Connecting user's name
    pub self_name: String,
    /// Team
    pub team: Team,
    /// Channel and group names by ID
    pub channels: HashMap<ChannelId, String>,
    /// Other participant of each IM
    pub ims: HashMap<ChannelId, UserId>,
    /// User names by ID
    pub users: HashMap<UserId, String>,
    /// Bot names by ID
    pub bots: HashMap<String, String>,
}

/// Roster returned by `rtm.start`, kept current from membership and
/// rename events. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct TeamContext {
    inner: Arc<RwLock<TeamSnapshot>>,
}

impl TeamContext {
    /// Empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the roster with a fresh bootstrap reply
    pub fn replace(&self, info: &RtmStartResponse) {
        let channels = info
            .channels
            .iter()
            .map(|c| &c.base)
            .chain(info.groups.iter().map(|g| &g.base))
            .map(|base| (base.id.clone(), base.name.clone()))
            .collect();

        let snapshot = TeamSnapshot {
            self_id: info.self_info.id.clone(),
            self_name: info.self_info.name.clone(),
            team: info.team.clone(),
            channels,
            ims: info
                .ims
                .iter()
                .map(|im| (im.base.id.clone(), im.user.clone()))
                .collect(),
            users: info
                .users
                .iter()
                .map(|u| (u.id.clone(), u.name.clone()))
                .collect(),
            bots: info
                .bots
                .iter()
                .map(|b| (b.id.clone(), b.name.clone()))
                .collect(),
        };
        *self.inner.write() = snapshot;
    }

    /// Update the roster from an event. Unrelated events are ignored.
    pub fn apply(&self, event: &UnifiedEvent) {
        match event.kind.as_str() {
            "channel_created" | "channel_joined" | "channel_rename" | "group_joined"
            | "group_rename" => {
                if let Some(name) = event.name.as_ref().filter(|_| !event.channel.is_empty()) {
                    self.inner
                        .write()
                        .channels
                        .insert(event.channel.clone(), name.clone());
                }
            }
            "channel_deleted" => {
                self.inner.write().channels.remove(&event.channel);
            }
            "im_created" if !event.channel.is_empty() => {
                self.inner
                    .write()
                    .ims
                    .insert(event.channel.clone(), event.user.clone());
            }
            "team_join" | "user_change" => {
                if let Some(name) = event.name.as_ref().filter(|_| !event.user.is_empty()) {
                    self.inner
                        .write()
                        .users
                        .insert(event.user.clone(), name.clone());
                }
            }
            _ => {}
        }
    }

    /// Name of a channel or group
    pub fn channel_name(&self, id: &ChannelId) -> Option<String> {
        self.inner.read().channels.get(id).cloned()
    }

    /// Find a channel or group by name, ignoring case and a leading `#`
    pub fn find_channel(&self, name: &str) -> Option<ChannelId> {
        let name = name.trim().trim_start_matches('#');
        self.inner
            .read()
            .channels
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(id, _)| id.clone())
    }

    /// Name of a user
    pub fn user_name(&self, id: &UserId) -> Option<String> {
        self.inner.read().users.get(id).cloned()
    }

    /// Find a user by name, ignoring case and a leading `@`
    pub fn find_user(&self, name: &str) -> Option<UserId> {
        let name = name.trim().trim_start_matches('@');
        self.inner
            .read()
            .users
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(id, _)| id.clone())
    }

    /// The other participant of an IM
    pub fn im_user(&self, id: &ChannelId) -> Option<UserId> {
        self.inner.read().ims.get(id).cloned()
    }

    /// Connecting user
    pub fn self_id(&self) -> UserId {
        self.inner.read().self_id.clone()
    }

    /// Copy of the current roster
    pub fn snapshot(&self) -> TeamSnapshot {
        self.inner.read().clone()
    }
}
