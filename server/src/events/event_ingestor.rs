use std::hash::Hash;

use log::{debug, info, warn};

use nametag_shared::{
    AgentId, Tick, WorldId, WorldMutType, WorldRefType, TEXT_OPACITY_FULL, TEXT_OPACITY_SNEAKING,
};

use crate::{
    context::OverlayContext,
    events::LifecycleEvent,
    schedule::{DeferredAction, DeferredTask, Precondition},
    state::state_tracker::discard_overlay,
    LifeState, ServerConfig,
};

/// Applies the immediate effect of each life-cycle trigger and schedules the
/// deferred follow-ups. Every deferred follow-up re-checks its precondition
/// against the live world when it fires.
pub(crate) struct EventIngestor {
    join_delay: Tick,
    respawn_delay: Tick,
    world_change_delay: Tick,
    teleport_delay: Tick,
    quit_rescan_delay: Tick,
    cloak_off_delay: Tick,
    see_through_walls: bool,
}

impl EventIngestor {
    pub fn new(config: &ServerConfig) -> Self {
        let timing = &config.timing;
        Self {
            join_delay: timing.ticks(timing.join_settle_delay),
            respawn_delay: timing.ticks(timing.respawn_settle_delay),
            world_change_delay: timing.ticks(timing.world_change_delay),
            teleport_delay: timing.ticks(timing.teleport_delay),
            quit_rescan_delay: timing.ticks(timing.quit_rescan_delay),
            cloak_off_delay: timing.ticks(timing.cloak_off_delay),
            see_through_walls: config.appearance.see_through_walls,
        }
    }

    pub fn handle<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        event: LifecycleEvent<E>,
    ) {
        match event {
            LifecycleEvent::Join(agent_id) => self.on_join(ctx, world, &agent_id),
            LifecycleEvent::Quit(agent_id) => self.on_quit(ctx, world, &agent_id),
            LifecycleEvent::Death(agent_id) => self.on_death(ctx, world, &agent_id),
            LifecycleEvent::Respawn(agent_id) => self.on_respawn(ctx, world, &agent_id),
            LifecycleEvent::WorldChange { agent_id, from } => {
                self.on_world_change(ctx, world, &agent_id, &from)
            }
            LifecycleEvent::Teleport(agent_id) => self.on_teleport(ctx, &agent_id),
            LifecycleEvent::Sneak { agent_id, sneaking } => {
                self.on_sneak(ctx, world, &agent_id, sneaking)
            }
            LifecycleEvent::CloakOn(agent_id) => self.on_cloak_on(ctx, world, &agent_id),
            LifecycleEvent::CloakOff(agent_id) => self.on_cloak_off(ctx, &agent_id),
            LifecycleEvent::Detached(entity) => self.on_detached(ctx, world, &entity),
            LifecycleEvent::ProfileChanged(agent_id) => {
                self.on_profile_changed(ctx, world, &agent_id)
            }
        }
    }

    // Triggers

    /// Starts a fresh `Settling` record; the overlay follows after the settle
    /// delay
    pub fn on_join<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        agent_id: &AgentId,
    ) {
        let fire_at = ctx.now.saturating_add(self.join_delay);
        ctx.tracker.reset(world, agent_id, fire_at);
        ctx.deferred.schedule(
            fire_at,
            *agent_id,
            DeferredAction::CreateOverlay,
            Precondition::present(),
        );
        info!("{} joined, overlay due at tick {}", agent_id, fire_at);
    }

    /// Tears everything down at once, then scans again a little later in
    /// case a create landed after the first teardown
    pub fn on_quit<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        agent_id: &AgentId,
    ) {
        if ctx.tracker.contains(agent_id) {
            ctx.transition(world, agent_id, LifeState::Offline);
        }
        ctx.tracker.remove(world, agent_id);
        ctx.tracker.purge_strays(world, agent_id, None);

        ctx.deferred.schedule(
            ctx.now.saturating_add(self.quit_rescan_delay),
            *agent_id,
            DeferredAction::PurgeStrays,
            Precondition::Departed,
        );
        info!("{} quit", agent_id);
    }

    /// Removes the overlay before anything else reacts to the death. The
    /// agent counts as dead until a respawn or a join, whatever the host
    /// reports in between.
    pub fn on_death<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        agent_id: &AgentId,
    ) {
        ctx.tracker.upsert(agent_id).mark_dead_by_event();
        ctx.transition(world, agent_id, LifeState::Dead);
        ctx.tracker.destroy_overlay(world, agent_id);
        ctx.tracker.purge_strays(world, agent_id, None);
        debug!("{} died", agent_id);
    }

    pub fn on_respawn<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        agent_id: &AgentId,
    ) {
        let fire_at = ctx.now.saturating_add(self.respawn_delay);
        ctx.tracker.upsert(agent_id);
        if !ctx.transition(world, agent_id, LifeState::Settling) {
            return;
        }
        if let Some(record) = ctx.tracker.get_mut(agent_id) {
            record.begin_settling(fire_at);
        }
        ctx.deferred.schedule(
            fire_at,
            *agent_id,
            DeferredAction::CreateOverlay,
            Precondition::present(),
        );
        debug!("{} respawned, overlay due at tick {}", agent_id, fire_at);
    }

    /// Only overlays left behind in the departed world are removed here
    pub fn on_world_change<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        agent_id: &AgentId,
        from: &WorldId,
    ) {
        ctx.tracker.purge_strays(world, agent_id, Some(from));
        ctx.deferred.schedule_from(
            ctx.now.saturating_add(self.world_change_delay),
            *agent_id,
            DeferredAction::CreateOverlay,
            Precondition::present(),
            Some(*from),
        );
        debug!("{} left {}", agent_id, from);
    }

    pub fn on_teleport<E: Copy + Eq + Hash>(&self, ctx: &mut OverlayContext<E>, agent_id: &AgentId) {
        ctx.deferred.schedule(
            ctx.now.saturating_add(self.teleport_delay),
            *agent_id,
            DeferredAction::Remount,
            Precondition::online(),
        );
    }

    /// Dims the overlay while sneaking. Does nothing at all when labels do
    /// not render through walls.
    pub fn on_sneak<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        agent_id: &AgentId,
        sneaking: bool,
    ) {
        if !self.see_through_walls {
            return;
        }
        let Some(record) = ctx.tracker.get_mut(agent_id) else {
            return;
        };
        record.set_sneaking(sneaking);

        let Some(entity) = ctx.tracker.live_overlay(world, agent_id) else {
            return;
        };

        let (see_through, opacity) = if sneaking {
            (false, TEXT_OPACITY_SNEAKING)
        } else if ctx.is_cloaked(world, agent_id) {
            return;
        } else {
            (true, TEXT_OPACITY_FULL)
        };

        let result = world
            .set_see_through(&entity, see_through)
            .and_then(|()| world.set_text_opacity(&entity, opacity));
        if let Err(error) = result {
            debug!("could not restyle overlay of {}: {}", agent_id, error);
        }
    }

    /// Hides the overlay right away instead of waiting for the next sweep.
    /// The overlay itself stays.
    pub fn on_cloak_on<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        agent_id: &AgentId,
    ) {
        let Some(record) = ctx.tracker.get_mut(agent_id) else {
            return;
        };
        record.set_hidden(true);
        ctx.conceal(world, agent_id);
        debug!("{} cloaked", agent_id);
    }

    /// Waits briefly, so a second toggle in quick succession wins
    pub fn on_cloak_off<E: Copy + Eq + Hash>(&self, ctx: &mut OverlayContext<E>, agent_id: &AgentId) {
        ctx.deferred.schedule(
            ctx.now.saturating_add(self.cloak_off_delay),
            *agent_id,
            DeferredAction::RestoreVisibility,
            Precondition::present(),
        );
    }

    /// An overlay of ours came off its owner: destroy it and let the
    /// reconciler create a new one
    pub fn on_detached<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        entity: &E,
    ) {
        let Some(tag) = world.overlay_tag(entity) else {
            return;
        };
        let owner = tag.owner().or_else(|| ctx.tracker.owner_of(entity));
        if let Some(owner) = owner.as_ref() {
            ctx.tracker.forget_overlay(owner, entity);
        }
        if discard_overlay(world, owner.as_ref(), entity) {
            debug!("removed detached overlay");
        }
    }

    pub fn on_profile_changed<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        agent_id: &AgentId,
    ) {
        if ctx.tracker.contains(agent_id) {
            ctx.render(world, agent_id);
        }
    }

    // Deferred

    pub fn run_deferred<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        task: DeferredTask,
    ) {
        let agent_id = task.agent_id;
        if !self.precondition_holds(ctx, world, &agent_id, &task.precondition) {
            debug!("dropped stale {:?} for {}", task.action, agent_id);
            return;
        }

        match task.action {
            DeferredAction::CreateOverlay => {
                if let Some(origin) = task.origin {
                    debug!("recreating overlay of {} after leaving {}", agent_id, origin);
                }
                if ctx.transition(world, &agent_id, LifeState::Alive) {
                    if let Err(error) = ctx.create_overlay(world, &agent_id) {
                        warn!("could not create overlay: {}", error);
                    }
                }
            }
            DeferredAction::Remount => {
                let state = ctx.tracker.get(&agent_id).map(|record| record.state());
                match state {
                    None | Some(LifeState::Settling) => {}
                    Some(_) if ctx.is_dead(world, &agent_id) => {}
                    Some(_) if ctx.is_cloaked(world, &agent_id) => ctx.conceal(world, &agent_id),
                    Some(_) => {
                        if !ctx.tracker.remount(world, &agent_id) {
                            ctx.transition(world, &agent_id, LifeState::Alive);
                            if let Err(error) = ctx.create_overlay(world, &agent_id) {
                                warn!("could not recreate overlay: {}", error);
                            }
                        }
                    }
                }
            }
            DeferredAction::RestoreVisibility => {
                let now = ctx.now;
                let Some(record) = ctx.tracker.get_mut(&agent_id) else {
                    return;
                };
                record.set_hidden(false);
                // the pending settle task creates the overlay
                if record.state() == LifeState::Settling
                    && record.settle_deadline().is_some_and(|deadline| now < deadline)
                {
                    return;
                }
                if !ctx.transition(world, &agent_id, LifeState::Alive) {
                    return;
                }
                if !ctx.tracker.set_visibility(world, &agent_id, true) {
                    if let Err(error) = ctx.create_overlay(world, &agent_id) {
                        warn!("could not recreate overlay: {}", error);
                    }
                }
            }
            DeferredAction::PurgeStrays => {
                ctx.tracker.purge_strays(world, &agent_id, None);
            }
        }
    }

    fn precondition_holds<E: Copy + Eq + Hash, W: WorldRefType<E>>(
        &self,
        ctx: &OverlayContext<E>,
        world: &W,
        agent_id: &AgentId,
        precondition: &Precondition,
    ) -> bool {
        match precondition {
            Precondition::Present {
                require_alive,
                require_uncloaked,
            } => {
                world.is_online(agent_id)
                    && ctx.tracker.contains(agent_id)
                    && !(*require_alive && ctx.is_dead(world, agent_id))
                    && !(*require_uncloaked && ctx.is_cloaked(world, agent_id))
            }
            Precondition::Departed => !world.is_online(agent_id),
        }
    }
}
