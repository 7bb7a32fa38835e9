use thiserror::Error;

use crate::{AgentId, WorldId};

/// Errors reported by the host world when an overlay primitive cannot be
/// applied
///
/// Overlays are ephemeral and every entity can disappear between the moment
/// it is read and the moment it is mutated. Callers treat the "gone" family
/// of errors as success: the entity is already in the state a teardown wanted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The entity was removed or unloaded by the host
    #[error("Entity {entity_id} is no longer valid")]
    EntityInvalid { entity_id: String },

    /// The agent disconnected before the operation was applied
    #[error("{agent_id} is not online")]
    AgentOffline { agent_id: AgentId },

    /// The target world is not loaded
    #[error("{world_id} is not loaded")]
    WorldNotLoaded { world_id: WorldId },

    /// The host refused the operation for its own reasons
    #[error("Host rejected {operation}: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },
}

impl WorldError {
    /// True when the error means the target no longer exists
    pub fn is_gone(&self) -> bool {
        matches!(
            self,
            WorldError::EntityInvalid { .. } | WorldError::AgentOffline { .. }
        )
    }
}
