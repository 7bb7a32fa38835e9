use nametag_shared::Tick;

use crate::LifeState;

// AgentRecord
/// Bookkeeping for one online agent
#[derive(Clone, Debug)]
pub struct AgentRecord<E: Copy> {
    state: LifeState,
    overlay: Option<E>,
    hidden: bool,
    last_rendered: Option<u64>,
    sneaking: bool,
    settle_deadline: Option<Tick>,
    dead_by_event: bool,
}

impl<E: Copy> AgentRecord<E> {
    pub(crate) fn new() -> Self {
        Self {
            state: LifeState::Settling,
            overlay: None,
            hidden: false,
            last_rendered: None,
            sneaking: false,
            settle_deadline: None,
            dead_by_event: false,
        }
    }

    pub fn state(&self) -> LifeState {
        self.state
    }

    /// Handle of the overlay this record exclusively owns
    pub fn overlay(&self) -> Option<E> {
        self.overlay
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Last cloak decision pushed by the vanish service
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn last_rendered_hash(&self) -> Option<u64> {
        self.last_rendered
    }

    pub fn is_sneaking(&self) -> bool {
        self.sneaking
    }

    /// Tick after which a `Settling` record is settled by the reconciler
    pub fn settle_deadline(&self) -> Option<Tick> {
        self.settle_deadline
    }

    /// Set by a death notification and kept until a respawn or a join.
    /// A death only seen by polling the host never sets it.
    pub fn is_dead_by_event(&self) -> bool {
        self.dead_by_event
    }

    // Crate-public

    pub(crate) fn set_state(&mut self, state: LifeState) {
        self.state = state;
        if state != LifeState::Settling {
            self.settle_deadline = None;
        }
    }

    pub(crate) fn set_overlay(&mut self, overlay: E) {
        self.overlay = Some(overlay);
        self.last_rendered = None;
    }

    pub(crate) fn take_overlay(&mut self) -> Option<E> {
        self.last_rendered = None;
        self.overlay.take()
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn set_last_rendered(&mut self, hash: u64) {
        self.last_rendered = Some(hash);
    }

    pub(crate) fn set_sneaking(&mut self, sneaking: bool) {
        self.sneaking = sneaking;
    }

    pub(crate) fn mark_dead_by_event(&mut self) {
        self.dead_by_event = true;
    }

    pub(crate) fn begin_settling(&mut self, deadline: Tick) {
        self.dead_by_event = false;
        self.state = LifeState::Settling;
        self.settle_deadline = Some(deadline);
    }
}
