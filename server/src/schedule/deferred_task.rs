use std::cmp::Ordering;

use nametag_shared::{AgentId, Tick, WorldId};

// DeferredAction
/// What a deferred task does once its precondition still holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    /// Settle the record and create its overlay
    CreateOverlay,
    /// Mount the existing overlay again, or create one if it is missing
    Remount,
    /// Show the overlay again after a cloak-off, creating it if missing
    RestoreVisibility,
    /// Remove every overlay still tagged with the agent, anywhere
    PurgeStrays,
}

// Precondition
/// Re-checked against the live world when the task fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precondition {
    /// The agent must be online, and optionally alive and not cloaked
    Present {
        require_alive: bool,
        require_uncloaked: bool,
    },
    /// The agent must still be offline
    Departed,
}

impl Precondition {
    /// Online, alive and not cloaked
    pub const fn present() -> Self {
        Self::Present {
            require_alive: true,
            require_uncloaked: true,
        }
    }

    /// Online, whatever its state
    pub const fn online() -> Self {
        Self::Present {
            require_alive: false,
            require_uncloaked: false,
        }
    }
}

// DeferredTask
/// A one-shot action bound to a future tick. Tasks are never cancelled:
/// a stale task fails its precondition and is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeferredTask {
    pub fire_at: Tick,
    pub(crate) seq: u64,
    pub agent_id: AgentId,
    pub action: DeferredAction,
    pub precondition: Precondition,
    /// World the agent was in when the task was scheduled, if relevant
    pub origin: Option<WorldId>,
}

impl PartialOrd for DeferredTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DeferredTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fire_at
            .cmp(&other.fire_at)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}
