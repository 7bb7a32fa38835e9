//! The orphan sweep bounds the lifetime of any overlay the bookkeeping does
//! not account for.

use nametag_server::SweepReport;
use nametag_shared::{AgentId, OverlayTag};
use nametag_test::{assert_single_overlay, TestHarness, TestWorld};

#[test]
fn overlay_of_an_offline_owner_is_gone_within_one_sweep_interval() {
    let mut harness = TestHarness::new();
    let ghost = AgentId::from_u64(99);
    let leaked = harness
        .world
        .leak_overlay(TestWorld::NETHER, OverlayTag::owned_by(&ghost), None);

    let sweep = harness.orphan_sweep_interval();
    let reports = harness.tick_n(sweep);

    assert!(harness.world.overlay(&leaked).is_none());
    let removed: usize = reports
        .iter()
        .filter_map(|report| report.orphan_sweep.as_ref())
        .map(|report| report.owner_offline)
        .sum();
    assert_eq!(removed, 1);
}

#[test]
fn overlay_without_an_owner_value_is_removed() {
    let mut harness = TestHarness::new();
    harness
        .world
        .leak_overlay(TestWorld::OVERWORLD, OverlayTag::unowned(), None);

    let report = harness.server.sweep_orphans(&mut harness.world);

    assert_eq!(report.unowned, 1);
    assert_eq!(harness.world.overlay_count(), 0);
}

#[test]
fn unmounted_overlay_is_removed_and_later_recreated() {
    let mut harness = TestHarness::new();
    let steve = harness.join_settled(1, "Steve");
    let entity = harness.overlay_of(&steve).unwrap();

    harness.world.knock_off(&steve, &entity);
    let report = harness.server.sweep_orphans(&mut harness.world);
    assert_eq!(report.unmounted, 1);
    assert!(harness.world.overlay(&entity).is_none());
    assert_eq!(harness.overlay_of(&steve), None);

    let reconcile = harness.server.reconcile(&mut harness.world);
    assert_eq!(reconcile.created, 1);
    assert_single_overlay!(harness, steve);
}

#[test]
fn duplicate_mounted_overlay_is_removed() {
    let mut harness = TestHarness::new();
    let steve = harness.join_settled(1, "Steve");
    let tracked = harness.overlay_of(&steve).unwrap();
    let duplicate = harness
        .world
        .leak_overlay(TestWorld::OVERWORLD, OverlayTag::owned_by(&steve), Some(&steve));

    let report = harness.server.sweep_orphans(&mut harness.world);

    assert_eq!(report.duplicates, 1);
    assert!(harness.world.overlay(&duplicate).is_none());
    assert_eq!(harness.overlay_of(&steve), Some(tracked));
    assert_single_overlay!(harness, steve);
}

#[test]
fn handle_to_a_vanished_entity_is_dropped() {
    let mut harness = TestHarness::new();
    let steve = harness.join_settled(1, "Steve");
    let entity = harness.overlay_of(&steve).unwrap();

    harness.world.vaporize(&entity);
    let report = harness.server.sweep_orphans(&mut harness.world);

    assert_eq!(
        report,
        SweepReport {
            stale_handles: 1,
            ..SweepReport::default()
        }
    );
    assert_eq!(harness.overlay_of(&steve), None);
}

#[test]
fn consistent_world_is_left_alone() {
    let mut harness = TestHarness::new();
    let _steve = harness.join_settled(1, "Steve");
    let _alex = harness.join_settled(2, "Alex");

    let report = harness.server.sweep_orphans(&mut harness.world);

    assert!(report.is_empty());
    assert_eq!(harness.world.overlay_count(), 2);
}

#[test]
fn shutdown_leaves_no_overlay_behind() {
    let mut harness = TestHarness::new();
    let steve = harness.join_settled(1, "Steve");
    let _alex = harness.join_settled(2, "Alex");
    harness
        .world
        .leak_overlay(TestWorld::NETHER, OverlayTag::owned_by(&steve), None);

    harness.server.shutdown(&mut harness.world);

    assert_eq!(harness.world.overlay_count(), 0);
    assert!(harness.server.tracker().is_empty());
    assert_eq!(harness.server.pending_tasks(), 0);
}
