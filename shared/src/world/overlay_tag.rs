use crate::AgentId;

// OverlayTag
/// Marker stored on every overlay entity this engine spawns.
///
/// The presence of a tag identifies the entity as ours; `owner` is `None`
/// when the marker exists but the owner value is missing or unreadable,
/// which always makes the entity an orphan.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct OverlayTag {
    owner: Option<AgentId>,
}

impl OverlayTag {
    pub fn owned_by(owner: &AgentId) -> Self {
        Self {
            owner: Some(*owner),
        }
    }

    pub fn unowned() -> Self {
        Self { owner: None }
    }

    pub fn owner(&self) -> Option<AgentId> {
        self.owner
    }

    pub fn is_owned_by(&self, agent_id: &AgentId) -> bool {
        self.owner.as_ref() == Some(agent_id)
    }
}
