use nametag_shared::{AgentId, WorldId};

// LifecycleEvent
/// A life-cycle notification from the host or from an external service
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleEvent<E> {
    Join(AgentId),
    Quit(AgentId),
    Death(AgentId),
    Respawn(AgentId),
    /// The agent now lives in another world; `from` is the one it left
    WorldChange { agent_id: AgentId, from: WorldId },
    Teleport(AgentId),
    Sneak { agent_id: AgentId, sneaking: bool },
    /// Pushed by the vanish service
    CloakOn(AgentId),
    /// Pushed by the vanish service
    CloakOff(AgentId),
    /// An overlay came off its owner without the engine asking
    Detached(E),
    /// Rank or profile data of the agent changed
    ProfileChanged(AgentId),
}

impl<E> LifecycleEvent<E> {
    /// The agent this event is about, if it names one
    pub fn agent_id(&self) -> Option<AgentId> {
        match self {
            Self::Join(agent_id)
            | Self::Quit(agent_id)
            | Self::Death(agent_id)
            | Self::Respawn(agent_id)
            | Self::Teleport(agent_id)
            | Self::CloakOn(agent_id)
            | Self::CloakOff(agent_id)
            | Self::ProfileChanged(agent_id) => Some(*agent_id),
            Self::WorldChange { agent_id, .. } | Self::Sneak { agent_id, .. } => Some(*agent_id),
            Self::Detached(_) => None,
        }
    }
}
