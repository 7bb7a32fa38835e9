//! Quitting removes the record and every overlay the agent owned, twice.

use nametag_shared::OverlayTag;
use nametag_test::{assert_no_overlay, assert_single_overlay, TestHarness, TestWorld};

fn quit_rescan_delay(harness: &TestHarness) -> u64 {
    let timing = &harness.server.config().timing;
    timing.ticks(timing.quit_rescan_delay)
}

#[test]
fn quit_tears_down_and_forgets_the_agent() {
    let mut harness = TestHarness::new();
    let steve = harness.join_settled(1, "Steve");
    let entity = harness.overlay_of(&steve).unwrap();

    harness.quit(&steve);

    assert!(harness.world.overlay(&entity).is_none());
    assert!(!harness.server.tracker().contains(&steve));
    assert_eq!(harness.world.overlay_count(), 0);
}

#[test]
fn quit_scans_every_world_for_strays() {
    let mut harness = TestHarness::new();
    let steve = harness.join_settled(1, "Steve");
    harness
        .world
        .leak_overlay(TestWorld::NETHER, OverlayTag::owned_by(&steve), None);

    harness.quit(&steve);

    assert!(harness.world.overlays_owned_by(&steve).is_empty());
}

#[test]
fn rescan_catches_an_overlay_that_landed_after_the_quit() {
    let mut harness = TestHarness::new();
    let steve = harness.join_settled(1, "Steve");
    harness.quit(&steve);

    let late = harness
        .world
        .leak_overlay(TestWorld::OVERWORLD, OverlayTag::owned_by(&steve), None);
    let delay = quit_rescan_delay(&harness);
    harness.tick_n(delay);

    assert!(harness.world.overlay(&late).is_none());
    assert_eq!(harness.server.pending_tasks_for(&steve), 0);
}

#[test]
fn quick_rejoin_keeps_its_new_overlay() {
    let mut harness = TestHarness::new();
    let steve = harness.join_settled(1, "Steve");
    harness.quit(&steve);
    harness.tick();

    let steve = harness.join_settled(1, "Steve");
    let entity = harness.overlay_of(&steve).unwrap();
    harness.tick_n(quit_rescan_delay(&harness));

    assert_eq!(harness.overlay_of(&steve), Some(entity));
    assert_single_overlay!(harness, steve);
}

#[test]
fn quit_while_settling_cancels_the_pending_create() {
    let mut harness = TestHarness::new();
    let steve = harness.join(1, "Steve");
    harness.quit(&steve);

    let delay = harness.join_delay();
    harness.tick_n(delay);

    assert_no_overlay!(harness, steve);
    assert_eq!(harness.server.pending_tasks(), 0);
}
