//! Response types for users service.

use crate::types::User;
use serde::Deserialize;

/// Response from users.info
#[derive(Debug, Clone, Deserialize)]
pub struct GetUserResponse {
    /// Success indicator
    pub ok: bool,
    /// The user
    #[serde(default)]
    pub user: User,
}

/// Response from users.admin.invite
#[derive(Debug, Clone, Deserialize)]
pub struct InviteResponse {
    /// Success indicator
    pub ok: bool,
}
