use std::hash::Hash;

use log::{debug, warn};

use nametag_shared::{AgentId, Tick, WorldMutType, WorldRefType};

use crate::{
    label::LabelComposer, schedule::DeferredQueue, state::state_tracker::StateTracker,
    vanish::VanishOracle, LifeState, NametagServerError,
};

/// Everything the handlers and sweeps mutate, owned by the server and lent
/// to one of them at a time
pub(crate) struct OverlayContext<E: Copy + Eq + Hash> {
    pub tracker: StateTracker<E>,
    pub oracle: VanishOracle,
    pub composer: LabelComposer,
    pub deferred: DeferredQueue,
    pub now: Tick,
}

impl<E: Copy + Eq + Hash> OverlayContext<E> {
    pub fn is_cloaked<W: WorldRefType<E>>(&self, world: &W, agent_id: &AgentId) -> bool {
        self.oracle.is_cloaked(world, agent_id)
    }

    /// Dead according to the host, or marked dead by a death notification
    /// that no respawn or join has cleared yet
    pub fn is_dead<W: WorldRefType<E>>(&self, world: &W, agent_id: &AgentId) -> bool {
        let marked = self
            .tracker
            .get(agent_id)
            .is_some_and(|record| record.is_dead_by_event());
        marked || world.agent(agent_id).is_some_and(|handle| handle.dead)
    }

    /// Creates the agent's overlay and renders its content straight away
    pub fn create_overlay<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        agent_id: &AgentId,
    ) -> Result<E, NametagServerError> {
        let entity = self.tracker.create_overlay(world, agent_id)?;
        self.render(world, agent_id);
        Ok(entity)
    }

    /// Moves the agent to `to`, logging a refused transition instead of
    /// returning it
    pub fn transition<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        agent_id: &AgentId,
        to: LifeState,
    ) -> bool {
        match self.tracker.transition(world, agent_id, to) {
            Ok(_) => true,
            Err(error) => {
                warn!("{}", error);
                false
            }
        }
    }

    /// Hides an existing overlay from everyone, moving the record to
    /// `Vanished` unless it is dead
    pub fn conceal<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId) {
        let Some(state) = self.tracker.get(agent_id).map(|record| record.state()) else {
            return;
        };
        if !state.forbids_overlay() && state != LifeState::Vanished {
            self.transition(world, agent_id, LifeState::Vanished);
        }
        let Some(entity) = self.tracker.live_overlay(world, agent_id) else {
            return;
        };
        if world.visible_by_default(&entity) != Some(false) {
            self.tracker.set_visibility(world, agent_id, false);
        }
    }

    /// Re-renders the overlay text, and the list name when mirroring is on
    pub fn render<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId) {
        let Some(handle) = world.agent(agent_id) else {
            return;
        };

        if self.tracker.overlay(agent_id).is_some() {
            let text = self.composer.compose(&handle);
            self.tracker.apply_label(world, agent_id, &text);
        }

        if self.composer.mirrors_list_name() {
            let list_name = self.composer.compose_list_name(&handle);
            if let Err(error) = world.set_list_name(agent_id, &list_name) {
                debug!("could not set list name of {}: {}", agent_id, error);
            }
        }
    }
}
