//! Response types for team service.

use crate::types::Team;
use serde::Deserialize;

/// Response from team.info
#[derive(Debug, Clone, Deserialize)]
pub struct TeamInfoResponse {
    /// Success indicator
    pub ok: bool,
    /// Team information
    #[serde(default)]
    pub team: Team,
}
