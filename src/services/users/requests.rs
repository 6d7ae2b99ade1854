//! Request types for users service.

use crate::client::Params;
use crate::errors::{SlackError, SlackResult};
use crate::types::ChannelId;

/// Account type of an invited user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InviteeType {
    /// Full member
    #[default]
    Regular,
    /// Multi-channel guest
    Restricted,
    /// Single-channel guest
    UltraRestricted,
}

/// Request for users.admin.invite
#[derive(Debug, Clone, Default)]
pub struct InviteRequest {
    /// Address the invitation is sent to
    pub email: String,
    /// Optional first name
    pub first_name: Option<String>,
    /// Optional last name
    pub last_name: Option<String>,
    /// Channels and groups the user joins on signup
    pub channels: Vec<ChannelId>,
    /// Account type
    pub invitee_type: InviteeType,
}

impl InviteRequest {
    /// Create a new request
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    /// Set the first name
    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Set the last name
    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Add a channel to join
    pub fn channel(mut self, channel: impl Into<ChannelId>) -> Self {
        self.channels.push(channel.into());
        self
    }

    /// Set the account type
    pub fn invitee_type(mut self, invitee_type: InviteeType) -> Self {
        self.invitee_type = invitee_type;
        self
    }

    pub(crate) fn to_params(&self) -> SlackResult<Params> {
        if self.email.is_empty() {
            return Err(SlackError::validation("email is required"));
        }
        if !self.email.contains('@') {
            return Err(SlackError::validation(format!(
                "invalid email address: {}",
                self.email
            )));
        }

        let channels = self
            .channels
            .iter()
            .map(ChannelId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        Ok(Params::new()
            .set("email", self.email.as_str())
            .set_opt("first_name", self.first_name.as_deref())
            .set_opt("last_name", self.last_name.as_deref())
            .set_if_not_empty("channels", &channels)
            .flag("restricted", self.invitee_type == InviteeType::Restricted)
            .flag(
                "ultra_restricted",
                self.invitee_type == InviteeType::UltraRestricted,
            )
            .set("set_active", "true"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_params() {
        let params = InviteRequest::new("jo@example.com")
            .first_name("Jo")
            .channel("C1")
            .channel("G2")
            .invitee_type(InviteeType::UltraRestricted)
            .to_params()
            .unwrap();

        assert_eq!(params.get("email"), Some("jo@example.com"));
        assert_eq!(params.get("first_name"), Some("Jo"));
        assert_eq!(params.get("last_name"), None);
        assert_eq!(params.get("channels"), Some("C1,G2"));
        assert_eq!(params.get("restricted"), None);
        assert_eq!(params.get("ultra_restricted"), Some("1"));
    }

    #[test]
    fn test_invite_requires_email() {
        assert!(InviteRequest::new("").to_params().is_err());
        assert!(InviteRequest::new("not-an-address").to_params().is_err());
    }
}
