use thiserror::Error;

use nametag_shared::{AgentId, WorldError};

use crate::LifeState;

/// Errors returned by the state tracker's mutating operations
///
/// Handlers and sweeps log these and carry on with the next agent: a failure
/// for one agent never aborts work for the others.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NametagServerError {
    /// No record exists for the agent
    #[error("{agent_id} has no record")]
    UnknownAgent { agent_id: AgentId },

    /// The agent is not online according to the host
    #[error("{agent_id} is not online")]
    AgentOffline { agent_id: AgentId },

    /// The transition table does not allow this move
    #[error("{agent_id} cannot transition from {from:?} to {to:?}")]
    InvalidTransition {
        agent_id: AgentId,
        from: LifeState,
        to: LifeState,
    },

    /// An overlay was requested while the record's state forbids one
    #[error("{agent_id} may not hold an overlay while {state:?}")]
    OverlayForbidden { agent_id: AgentId, state: LifeState },

    #[error(transparent)]
    World(#[from] WorldError),
}
