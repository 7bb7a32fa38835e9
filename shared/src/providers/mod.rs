pub mod error;

use crate::AgentId;

use self::error::ProviderError;

// RankInfo
/// What a permissions/rank service knows about an agent
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankInfo {
    /// Display prefix, may contain legacy color codes
    pub prefix: Option<String>,
    /// Name of the agent's primary group
    pub primary_group: Option<String>,
}

impl RankInfo {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: Some(prefix.to_string()),
            primary_group: None,
        }
    }

    pub fn with_group(group: &str) -> Self {
        Self {
            prefix: None,
            primary_group: Some(group.to_string()),
        }
    }
}

/// Supplies rank prefixes
pub trait RankProvider {
    fn rank(&self, agent_id: &AgentId) -> Result<RankInfo, ProviderError>;
}

/// Resolves a clan name through a lookup key (a placeholder such as
/// `%clan_name%`). Returning the key itself means "unresolved".
pub trait ClanProvider {
    fn clan_name(&self, agent_id: &AgentId, key: &str) -> Result<Option<String>, ProviderError>;
}

/// Current round-trip latency of an agent
pub trait PingSource {
    fn ping_ms(&self, agent_id: &AgentId) -> Result<u32, ProviderError>;
}

/// Primary cloak-status service
pub trait VanishProvider {
    fn is_hidden(&self, agent_id: &AgentId) -> Result<bool, ProviderError>;
}
