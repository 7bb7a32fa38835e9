use std::hash::Hash;

use log::{debug, info};

use nametag_shared::WorldMutType;

use crate::{context::OverlayContext, state::state_tracker::discard_overlay};

/// Counts of what one orphan sweep removed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Tagged overlays with no owner at all
    pub unowned: usize,
    /// Overlays whose owner is not online
    pub owner_offline: usize,
    /// Overlays that are not riding their owner
    pub unmounted: usize,
    /// Mounted overlays that are not the one their owner's record tracks
    pub duplicates: usize,
    /// Tracked handles whose entity no longer exists
    pub stale_handles: usize,
}

impl SweepReport {
    pub fn removed(&self) -> usize {
        self.unowned + self.owner_offline + self.unmounted + self.duplicates
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Scans every world for overlays that no record accounts for. Bounds the
/// lifetime of any leaked overlay to one sweep interval.
#[derive(Default)]
pub struct OrphanSweeper;

impl OrphanSweeper {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn sweep<E: Copy + Eq + Hash, W: WorldMutType<E>>(
        &self,
        ctx: &mut OverlayContext<E>,
        world: &mut W,
    ) -> SweepReport {
        let mut report = SweepReport::default();

        for world_id in world.worlds() {
            for entity in world.entities(&world_id) {
                let Some(tag) = world.overlay_tag(&entity) else {
                    continue;
                };

                let Some(owner) = tag.owner() else {
                    if discard_overlay(world, None, &entity) {
                        report.unowned += 1;
                    }
                    continue;
                };

                if !world.is_online(&owner) {
                    ctx.tracker.forget_overlay(&owner, &entity);
                    if discard_overlay(world, Some(&owner), &entity) {
                        report.owner_offline += 1;
                    }
                    continue;
                }

                if !world.is_mounted_on(&owner, &entity) {
                    ctx.tracker.forget_overlay(&owner, &entity);
                    if discard_overlay(world, None, &entity) {
                        report.unmounted += 1;
                    }
                    continue;
                }

                if ctx.tracker.overlay(&owner) != Some(entity) {
                    if discard_overlay(world, Some(&owner), &entity) {
                        report.duplicates += 1;
                    }
                }
            }
        }

        for agent_id in ctx.tracker.agent_ids() {
            if ctx.tracker.overlay(&agent_id).is_some()
                && ctx.tracker.live_overlay(world, &agent_id).is_none()
            {
                report.stale_handles += 1;
            }
        }

        if report.removed() > 0 {
            info!("orphan sweep removed {} overlay(s)", report.removed());
        }
        if !report.is_empty() {
            debug!("orphan sweep: {:?}", report);
        }
        report
    }
}
