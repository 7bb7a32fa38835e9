use std::fmt;

/// Number of elapsed server ticks since the engine started
pub type Tick = u64;

// AgentId
/// Stable identifier of an agent (a connected participant), valid across
/// reconnects
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct AgentId(u64);

impl AgentId {
    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub const fn from_u64(value: u64) -> Self {
        AgentId(value)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

// WorldId
/// Identifier of one world (dimension) hosted by the server
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct WorldId(u64);

impl WorldId {
    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub const fn from_u64(value: u64) -> Self {
        WorldId(value)
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "world#{}", self.0)
    }
}
