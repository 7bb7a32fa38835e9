use std::{collections::HashMap, hash::Hash};

use log::{debug, info, warn};

use nametag_shared::{
    AgentId, LabelText, OverlayStyle, OverlayTag, Tick, WorldId, WorldMutType, WorldRefType,
    TEXT_OPACITY_SNEAKING,
};

use crate::{
    label::label_hash, state::agent_record::AgentRecord, LifeState, NametagServerError,
    TransitionEffect,
};

/// Owns the record of every online agent and is the only code path that
/// spawns overlays.
///
/// `create_overlay` always tears down whatever the agent already owns before
/// spawning, so a record never owns more than one overlay.
pub struct StateTracker<E: Copy + Eq + Hash> {
    records: HashMap<AgentId, AgentRecord<E>>,
    style: OverlayStyle,
}

impl<E: Copy + Eq + Hash> StateTracker<E> {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            records: HashMap::new(),
            style,
        }
    }

    // Records

    /// Returns the agent's record, creating a `Settling` one if needed
    pub fn upsert(&mut self, agent_id: &AgentId) -> &mut AgentRecord<E> {
        self.records
            .entry(*agent_id)
            .or_insert_with(AgentRecord::new)
    }

    pub fn get(&self, agent_id: &AgentId) -> Option<&AgentRecord<E>> {
        self.records.get(agent_id)
    }

    pub(crate) fn get_mut(&mut self, agent_id: &AgentId) -> Option<&mut AgentRecord<E>> {
        self.records.get_mut(agent_id)
    }

    pub fn contains(&self, agent_id: &AgentId) -> bool {
        self.records.contains_key(agent_id)
    }

    /// Tears down the agent's overlay, then drops its record
    pub fn remove<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        agent_id: &AgentId,
    ) -> Option<AgentRecord<E>> {
        self.destroy_overlay(world, agent_id);
        self.records.remove(agent_id)
    }

    /// Replaces the agent's record with a fresh `Settling` one, tearing down
    /// anything the previous record still owned
    pub fn reset<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        agent_id: &AgentId,
        settle_deadline: Tick,
    ) -> &mut AgentRecord<E> {
        self.destroy_overlay(world, agent_id);
        let record = self.upsert(agent_id);
        *record = AgentRecord::new();
        record.begin_settling(settle_deadline);
        record
    }

    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.records.keys().copied().collect()
    }

    pub fn records(&self) -> impl Iterator<Item = (&AgentId, &AgentRecord<E>)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // Transitions

    /// Moves the agent to `to` if the transition table allows it, applying
    /// the transition's side effect
    pub fn transition<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        agent_id: &AgentId,
        to: LifeState,
    ) -> Result<TransitionEffect, NametagServerError> {
        let Some(record) = self.records.get_mut(agent_id) else {
            return Err(NametagServerError::UnknownAgent {
                agent_id: *agent_id,
            });
        };
        let from = record.state();
        let Some(effect) = from.transition_effect(to) else {
            return Err(NametagServerError::InvalidTransition {
                agent_id: *agent_id,
                from,
                to,
            });
        };

        if from != to {
            debug!("{} transitioned {:?} -> {:?}", agent_id, from, to);
        }
        record.set_state(to);

        match effect {
            TransitionEffect::Nothing => {}
            TransitionEffect::HideOverlay => {
                self.set_visibility(world, agent_id, false);
            }
            TransitionEffect::TeardownOverlay => {
                self.destroy_overlay(world, agent_id);
            }
        }

        Ok(effect)
    }

    // Overlays

    /// Spawns a fresh overlay for the agent in its current world, tags it,
    /// mounts it and makes it visible by default.
    ///
    /// Idempotent: any overlay the agent already owns is destroyed first.
    pub fn create_overlay<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        agent_id: &AgentId,
    ) -> Result<E, NametagServerError> {
        let Some(handle) = world.agent(agent_id) else {
            return Err(NametagServerError::AgentOffline {
                agent_id: *agent_id,
            });
        };
        let Some(record) = self.records.get(agent_id) else {
            return Err(NametagServerError::UnknownAgent {
                agent_id: *agent_id,
            });
        };
        if record.state().forbids_overlay() {
            return Err(NametagServerError::OverlayForbidden {
                agent_id: *agent_id,
                state: record.state(),
            });
        }
        let sneaking = record.is_sneaking();

        self.destroy_overlay(world, agent_id);

        let mut style = self.style.clone();
        if sneaking && style.see_through {
            style.see_through = false;
            style.text_opacity = TEXT_OPACITY_SNEAKING;
        }

        let entity = world.spawn_overlay(&handle.world, OverlayTag::owned_by(agent_id), &style)?;

        if let Err(error) = world.mount(agent_id, &entity) {
            warn!("could not mount overlay on {}: {}", agent_id, error);
            discard_overlay(world, None, &entity);
            return Err(error.into());
        }
        if let Err(error) = world.set_visible_by_default(&entity, true) {
            warn!("could not make overlay of {} visible: {}", agent_id, error);
        }

        if let Some(record) = self.records.get_mut(agent_id) {
            record.set_overlay(entity);
        }
        info!("created overlay for {} in {}", agent_id, handle.world);

        Ok(entity)
    }

    /// Unmounts and destroys the agent's overlay, then removes any other
    /// tagged overlay still riding the agent. Returns whether anything was
    /// removed.
    pub fn destroy_overlay<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId) -> bool {
        let mut removed = false;

        let tracked = self
            .records
            .get_mut(agent_id)
            .and_then(|record| record.take_overlay());
        if let Some(entity) = tracked {
            removed |= discard_overlay(world, Some(agent_id), &entity);
        }

        for passenger in world.passengers(agent_id) {
            if world.overlay_tag(&passenger).is_some() {
                removed |= discard_overlay(world, Some(agent_id), &passenger);
            }
        }

        if removed {
            debug!("destroyed overlay of {}", agent_id);
        }
        removed
    }

    /// Removes every overlay tagged with the agent in `scope`, or in every
    /// world when `scope` is `None`. Returns how many entities were removed.
    pub fn purge_strays<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        agent_id: &AgentId,
        scope: Option<&WorldId>,
    ) -> usize {
        let worlds = match scope {
            Some(world_id) => vec![*world_id],
            None => world.worlds(),
        };

        let mut removed = 0;
        for world_id in worlds {
            for entity in world.entities(&world_id) {
                let Some(tag) = world.overlay_tag(&entity) else {
                    continue;
                };
                if !tag.is_owned_by(agent_id) {
                    continue;
                }
                self.forget_overlay(agent_id, &entity);
                if discard_overlay(world, Some(agent_id), &entity) {
                    removed += 1;
                }
            }
        }

        if removed > 0 {
            debug!("purged {} stray overlay(s) of {}", removed, agent_id);
        }
        removed
    }

    /// Sets `visible_by_default` on the agent's overlay and notifies every
    /// other online observer individually. Returns false if the agent owns
    /// no live overlay.
    pub fn set_visibility<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        agent_id: &AgentId,
        visible: bool,
    ) -> bool {
        let Some(entity) = self.live_overlay(world, agent_id) else {
            return false;
        };

        if let Err(error) = world.set_visible_by_default(&entity, visible) {
            if error.is_gone() {
                self.forget_overlay(agent_id, &entity);
                return false;
            }
            warn!("could not change visibility of overlay of {}: {}", agent_id, error);
        }

        for observer in world.online_agents() {
            if observer == *agent_id {
                continue;
            }
            let result = if visible {
                world.show_to(&observer, &entity)
            } else {
                world.hide_from(&observer, &entity)
            };
            if let Err(error) = result {
                debug!("observer {} not updated: {}", observer, error);
            }
        }

        true
    }

    /// Mounts the agent's existing overlay again if it silently came off.
    /// Returns false if there was no live overlay or it could not be mounted.
    pub fn remount<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId) -> bool {
        let Some(entity) = self.live_overlay(world, agent_id) else {
            return false;
        };
        if world.is_mounted_on(agent_id, &entity) {
            return true;
        }
        match world.mount(agent_id, &entity) {
            Ok(()) => true,
            Err(error) => {
                warn!("could not remount overlay of {}: {}", agent_id, error);
                self.destroy_overlay(world, agent_id);
                false
            }
        }
    }

    /// Writes `text` onto the agent's overlay unless it is already showing
    /// exactly that. Returns whether the overlay was updated.
    pub fn apply_label<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        agent_id: &AgentId,
        text: &LabelText,
    ) -> bool {
        let Some(entity) = self.live_overlay(world, agent_id) else {
            return false;
        };
        let hash = label_hash(text);
        let Some(record) = self.records.get_mut(agent_id) else {
            return false;
        };
        if record.last_rendered_hash() == Some(hash) {
            return false;
        }
        match world.set_text(&entity, text) {
            Ok(()) => {
                record.set_last_rendered(hash);
                true
            }
            Err(error) => {
                debug!("could not set label of {}: {}", agent_id, error);
                false
            }
        }
    }

    /// The agent's overlay handle, as long as the entity still exists.
    /// A handle whose entity is gone is dropped.
    pub fn live_overlay<W: WorldRefType<E>>(&mut self, world: &W, agent_id: &AgentId) -> Option<E> {
        let record = self.records.get_mut(agent_id)?;
        let entity = record.overlay()?;
        if world.has_entity(&entity) {
            return Some(entity);
        }
        record.take_overlay();
        None
    }

    pub fn overlay(&self, agent_id: &AgentId) -> Option<E> {
        self.records.get(agent_id).and_then(|record| record.overlay())
    }

    pub fn owner_of(&self, entity: &E) -> Option<AgentId> {
        self.records
            .iter()
            .find(|(_, record)| record.overlay().as_ref() == Some(entity))
            .map(|(agent_id, _)| *agent_id)
    }

    /// Drops the agent's handle if it refers to `entity`
    pub fn forget_overlay(&mut self, agent_id: &AgentId, entity: &E) -> bool {
        let Some(record) = self.records.get_mut(agent_id) else {
            return false;
        };
        if record.overlay().as_ref() != Some(entity) {
            return false;
        }
        record.take_overlay();
        true
    }

    /// Tears down every tracked overlay and forgets every record
    pub fn shutdown<W: WorldMutType<E>>(&mut self, world: &mut W) {
        for agent_id in self.agent_ids() {
            self.destroy_overlay(world, &agent_id);
        }
        self.records.clear();
    }
}

/// Unmounts `entity` from `rider_of` if it is riding it, then despawns it.
/// An entity that is already gone counts as not removed.
pub(crate) fn discard_overlay<E: Copy + Eq + Hash, W: WorldMutType<E>>(
    world: &mut W,
    rider_of: Option<&AgentId>,
    entity: &E,
) -> bool {
    if let Some(agent_id) = rider_of {
        if world.is_mounted_on(agent_id, entity) {
            if let Err(error) = world.unmount(agent_id, entity) {
                if !error.is_gone() {
                    warn!("could not unmount overlay from {}: {}", agent_id, error);
                }
            }
        }
    }

    match world.despawn_entity(entity) {
        Ok(()) => true,
        Err(error) if error.is_gone() => false,
        Err(error) => {
            warn!("could not despawn overlay: {}", error);
            false
        }
    }
}
