//! User, bot and team types for the Slack API.

use super::{TeamId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Slack user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: UserId,
    /// Username
    #[serde(default)]
    pub name: String,
    /// Whether deleted/deactivated
    #[serde(default)]
    pub deleted: bool,
    /// User color
    #[serde(default)]
    pub color: String,
    /// Real name
    #[serde(default)]
    pub real_name: String,
    /// Timezone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
    /// Timezone label
    #[serde(default)]
    pub tz_label: String,
    /// Timezone offset in seconds
    #[serde(default)]
    pub tz_offset: i32,
    /// User profile
    #[serde(default)]
    pub profile: UserProfile,
    /// Whether bot
    #[serde(default)]
    pub is_bot: bool,
    /// Whether admin
    #[serde(default)]
    pub is_admin: bool,
    /// Whether owner
    #[serde(default)]
    pub is_owner: bool,
    /// Whether primary owner
    #[serde(default)]
    pub is_primary_owner: bool,
    /// Whether restricted
    #[serde(default)]
    pub is_restricted: bool,
    /// Whether ultra restricted
    #[serde(default)]
    pub is_ultra_restricted: bool,
    /// Whether two factor auth is enabled
    #[serde(default)]
    pub has_2fa: bool,
    /// Whether the user has files
    #[serde(default)]
    pub has_files: bool,
    /// Presence (active, away)
    #[serde(default)]
    pub presence: String,
}

/// User profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
    /// Real name
    #[serde(default)]
    pub real_name: String,
    /// Normalized real name
    #[serde(default)]
    pub real_name_normalized: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Skype handle
    #[serde(default)]
    pub skype: String,
    /// Phone number
    #[serde(default)]
    pub phone: String,
    /// 24px avatar
    #[serde(default)]
    pub image_24: String,
    /// 32px avatar
    #[serde(default)]
    pub image_32: String,
    /// 48px avatar
    #[serde(default)]
    pub image_48: String,
    /// 72px avatar
    #[serde(default)]
    pub image_72: String,
    /// 192px avatar
    #[serde(default)]
    pub image_192: String,
    /// Original avatar
    #[serde(default)]
    pub image_original: String,
    /// Title
    #[serde(default)]
    pub title: String,
}

/// Bot integration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bot {
    /// Bot ID
    pub id: String,
    /// Bot name
    #[serde(default)]
    pub name: String,
    /// Whether deleted
    #[serde(default)]
    pub deleted: bool,
    /// Icon URLs keyed by size
    #[serde(default)]
    pub icons: HashMap<String, String>,
}

/// Team icon URLs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamIcon {
    /// 34px icon
    #[serde(default)]
    pub image_34: String,
    /// 44px icon
    #[serde(default)]
    pub image_44: String,
    /// 68px icon
    #[serde(default)]
    pub image_68: String,
    /// 88px icon
    #[serde(default)]
    pub image_88: String,
    /// 102px icon
    #[serde(default)]
    pub image_102: String,
    /// 132px icon
    #[serde(default)]
    pub image_132: String,
    /// Whether the default icon is in use
    #[serde(default)]
    pub image_default: bool,
}

/// Team (workspace)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Team {
    /// Team ID
    pub id: TeamId,
    /// Team name
    #[serde(default)]
    pub name: String,
    /// Email domain
    #[serde(default)]
    pub email_domain: String,
    /// Slack domain
    #[serde(default)]
    pub domain: String,
    /// Team preferences
    #[serde(default)]
    pub prefs: HashMap<String, serde_json::Value>,
    /// Team icon
    #[serde(default)]
    pub icon: TeamIcon,
    /// Whether the team exceeded its storage limit
    #[serde(default)]
    pub over_storage_limit: bool,
    /// Billing plan
    #[serde(default)]
    pub plan: String,
}
