/// Life-cycle state of an agent as far as its overlay is concerned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifeState {
    /// Joined or respawned, waiting out the settle delay
    Settling,
    Alive,
    /// Cloaked: the overlay may exist but is hidden from every observer
    Vanished,
    Dead,
    Offline,
}

/// Side effect the tracker applies when a transition is accepted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionEffect {
    Nothing,
    HideOverlay,
    TeardownOverlay,
}

impl LifeState {
    /// Looks up `self -> to` in the transition table. `None` means the
    /// transition is not allowed.
    pub fn transition_effect(self, to: LifeState) -> Option<TransitionEffect> {
        use LifeState::*;

        if self == to {
            return Some(TransitionEffect::Nothing);
        }

        match (self, to) {
            // an offline record can only come back through a fresh join
            (Offline, Settling) => Some(TransitionEffect::Nothing),
            (Offline, _) => None,

            (_, Dead) | (_, Offline) => Some(TransitionEffect::TeardownOverlay),
            // a dead agent has no overlay left to hide
            (Dead, Vanished) => Some(TransitionEffect::Nothing),
            (_, Vanished) => Some(TransitionEffect::HideOverlay),
            (_, Settling) | (_, Alive) => Some(TransitionEffect::Nothing),
        }
    }

    /// Invariant: no overlay may exist for these states
    pub fn forbids_overlay(&self) -> bool {
        matches!(self, LifeState::Dead | LifeState::Offline)
    }
}
