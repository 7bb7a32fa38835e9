use std::hash::Hash;

use log::{debug, warn};

use nametag_shared::{AgentId, WorldMutType};

use crate::{context::OverlayContext, LifeState};

/// What one reconcile pass changed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: usize,
    pub shown: usize,
    pub hidden: usize,
    pub destroyed: usize,
    pub remounted: usize,
    pub settled: usize,
    /// Records dropped because their agent is no longer online
    pub removed: usize,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Level-triggered backstop: re-derives what every online agent's overlay
/// should look like and applies the smallest correction
#[derive(Default)]
pub struct Reconciler;

impl Reconciler {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn sweep<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
    ) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        for agent_id in ctx.tracker.agent_ids() {
            if !world.is_online(&agent_id) {
                ctx.transition(world, &agent_id, LifeState::Offline);
                ctx.tracker.remove(world, &agent_id);
                report.removed += 1;
            }
        }

        let mut online = world.online_agents();
        fastrand::shuffle(&mut online);

        for agent_id in online {
            self.reconcile_agent(ctx, world, &agent_id, &mut report);
        }

        if !report.is_empty() {
            debug!("reconcile pass: {:?}", report);
        }
        report
    }

    fn reconcile_agent<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
        agent_id: &AgentId,
        report: &mut ReconcileReport,
    ) {
        let now = ctx.now;
        let record = ctx.tracker.upsert(agent_id);
        let state = record.state();
        if state == LifeState::Settling {
            if record.settle_deadline().is_some_and(|deadline| now < deadline) {
                return;
            }
            report.settled += 1;
        }

        let dead = ctx.is_dead(world, agent_id);
        let cloaked = ctx.is_cloaked(world, agent_id);

        if dead {
            if state != LifeState::Dead {
                ctx.transition(world, agent_id, LifeState::Dead);
            }
            if ctx.tracker.destroy_overlay(world, agent_id) {
                report.destroyed += 1;
            }
            return;
        }

        if cloaked {
            let visible = ctx
                .tracker
                .live_overlay(world, agent_id)
                .is_some_and(|entity| world.visible_by_default(&entity) != Some(false));
            ctx.conceal(world, agent_id);
            if visible {
                report.hidden += 1;
            }
            return;
        }

        if state != LifeState::Alive && !ctx.transition(world, agent_id, LifeState::Alive) {
            return;
        }

        let Some(entity) = ctx.tracker.live_overlay(world, agent_id) else {
            match ctx.create_overlay(world, agent_id) {
                Ok(_) => report.created += 1,
                Err(error) => warn!("reconcile could not create overlay: {}", error),
            }
            return;
        };

        if world.visible_by_default(&entity) == Some(false) {
            ctx.tracker.set_visibility(world, agent_id, true);
            if let Some(record) = ctx.tracker.get_mut(agent_id) {
                record.set_hidden(false);
            }
            report.shown += 1;
        }

        if !world.is_mounted_on(agent_id, &entity) {
            if ctx.tracker.remount(world, agent_id) {
                report.remounted += 1;
            } else if ctx.create_overlay(world, agent_id).is_ok() {
                report.created += 1;
            }
        }
    }
}
