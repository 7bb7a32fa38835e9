use std::hash::Hash;

use crate::{AgentId, LabelText, OverlayStyle, OverlayTag, WorldError, WorldId};

// AgentHandle
/// Snapshot of an online agent, taken fresh every time the host is asked
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentHandle {
    pub id: AgentId,
    pub name: String,
    pub world: WorldId,
    /// The host's own view of whether the agent is currently dead
    pub dead: bool,
}

impl AgentHandle {
    pub fn new(id: AgentId, name: &str, world: WorldId) -> Self {
        Self {
            id,
            name: name.to_string(),
            world,
            dead: false,
        }
    }
}

/// Read-only access to the host world: its agent directory and its entity
/// source.
///
/// Every method is a fresh query. Implementations must never cache results
/// across calls, because the engine relies on re-reading the world at the
/// moment a deferred action fires.
pub trait WorldRefType<E: Copy + Eq + Hash> {
    // Agent directory

    /// All agents currently connected
    fn online_agents(&self) -> Vec<AgentId>;
    /// Looks up one agent; `None` if it is not online
    fn agent(&self, agent_id: &AgentId) -> Option<AgentHandle>;
    /// Every value set under `key` on the agent by any source
    fn agent_flags(&self, agent_id: &AgentId, key: &str) -> Vec<bool>;
    /// Entities currently riding the agent
    fn passengers(&self, agent_id: &AgentId) -> Vec<E>;

    // Entity source

    fn worlds(&self) -> Vec<WorldId>;
    /// All entities currently present in the given world
    fn entities(&self, world_id: &WorldId) -> Vec<E>;
    fn has_entity(&self, entity: &E) -> bool;
    fn entity_world(&self, entity: &E) -> Option<WorldId>;
    /// The overlay marker, if the entity was spawned by this engine
    fn overlay_tag(&self, entity: &E) -> Option<OverlayTag>;
    fn visible_by_default(&self, entity: &E) -> Option<bool>;

    // Provided

    fn is_online(&self, agent_id: &AgentId) -> bool {
        self.agent(agent_id).is_some()
    }

    fn is_mounted_on(&self, agent_id: &AgentId, entity: &E) -> bool {
        self.passengers(agent_id).contains(entity)
    }
}

/// Mutating access to the host world, the sink for every overlay primitive
pub trait WorldMutType<E: Copy + Eq + Hash>: WorldRefType<E> {
    /// Spawns a non-persistent overlay carrying `tag` in the given world
    fn spawn_overlay(
        &mut self,
        world_id: &WorldId,
        tag: OverlayTag,
        style: &OverlayStyle,
    ) -> Result<E, WorldError>;
    fn despawn_entity(&mut self, entity: &E) -> Result<(), WorldError>;

    fn mount(&mut self, agent_id: &AgentId, entity: &E) -> Result<(), WorldError>;
    fn unmount(&mut self, agent_id: &AgentId, entity: &E) -> Result<(), WorldError>;

    fn set_visible_by_default(&mut self, entity: &E, visible: bool) -> Result<(), WorldError>;
    /// Per-observer override: `observer` stops seeing `entity`.
    ///
    /// Overrides last only for the observer's session. Implementations must
    /// drop every override an observer holds when it disconnects, so a
    /// returning observer starts from `visible_by_default`.
    fn hide_from(&mut self, observer: &AgentId, entity: &E) -> Result<(), WorldError>;
    /// Per-observer override: `observer` sees `entity` again
    fn show_to(&mut self, observer: &AgentId, entity: &E) -> Result<(), WorldError>;

    fn set_text(&mut self, entity: &E, text: &LabelText) -> Result<(), WorldError>;
    fn set_see_through(&mut self, entity: &E, see_through: bool) -> Result<(), WorldError>;
    fn set_text_opacity(&mut self, entity: &E, opacity: u8) -> Result<(), WorldError>;

    /// Name shown for the agent in the connected-agents list
    fn set_list_name(&mut self, agent_id: &AgentId, text: &LabelText) -> Result<(), WorldError>;
}
