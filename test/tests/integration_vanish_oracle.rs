//! Every cloak check goes through one oracle; these pin down its fallback
//! order.

use nametag_server::{OverlayServer, Providers, ServerConfig, VanishOracle, VanishSource};
use nametag_shared::{AgentId, VANISHED_FLAG_KEY};
use nametag_test::{ScriptedVanish, TestEntity, TestHarness, TestWorld};

fn world_with_steve() -> (TestWorld, AgentId) {
    let mut world = TestWorld::new();
    let steve = AgentId::from_u64(1);
    world.connect(steve, "Steve", TestWorld::OVERWORLD);
    (world, steve)
}

#[test]
fn no_sources_means_never_cloaked() {
    let (mut world, steve) = world_with_steve();
    world.set_flag(&steve, VANISHED_FLAG_KEY, vec![true]);

    let oracle = VanishOracle::none();

    assert!(!oracle.has_sources());
    assert!(!oracle.is_cloaked(&world, &steve));
}

#[test]
fn any_true_flag_cloaks() {
    let (mut world, steve) = world_with_steve();
    let oracle = VanishOracle::fallback_only();
    assert!(!oracle.is_cloaked(&world, &steve));

    world.set_flag(&steve, VANISHED_FLAG_KEY, vec![false, false]);
    assert!(!oracle.is_cloaked(&world, &steve));

    world.set_flag(&steve, VANISHED_FLAG_KEY, vec![false, true]);
    assert!(oracle.is_cloaked(&world, &steve));
}

#[test]
fn primary_answer_is_final() {
    let (mut world, steve) = world_with_steve();
    world.set_flag(&steve, VANISHED_FLAG_KEY, vec![true]);
    let vanish = ScriptedVanish::new();

    let oracle = VanishOracle::with_primary(Box::new(vanish.clone()));

    assert!(!oracle.is_cloaked(&world, &steve));
    vanish.hide(&steve);
    assert!(oracle.is_cloaked(&world, &steve));
    assert_eq!(vanish.calls(), 2);
}

#[test]
fn failing_primary_hands_over_to_the_flag() {
    let (mut world, steve) = world_with_steve();
    let vanish = ScriptedVanish::new();
    vanish.hide(&steve);
    vanish.set_failing(true);

    let oracle = VanishOracle::with_primary(Box::new(vanish.clone()));
    assert!(!oracle.is_cloaked(&world, &steve));

    world.set_flag(&steve, VANISHED_FLAG_KEY, vec![true]);
    assert!(oracle.is_cloaked(&world, &steve));
}

#[test]
fn failing_primary_alone_means_not_cloaked() {
    let (world, steve) = world_with_steve();
    let vanish = ScriptedVanish::new();
    vanish.hide(&steve);
    vanish.set_failing(true);

    let oracle = VanishOracle::new(vec![VanishSource::Primary(Box::new(vanish))]);

    assert!(!oracle.is_cloaked(&world, &steve));
}

#[test]
fn server_without_flag_fallback_ignores_the_flag() {
    let vanish = ScriptedVanish::new();
    vanish.set_failing(true);
    let providers = Providers::new()
        .with_vanish(vanish)
        .without_flag_fallback();
    let server = OverlayServer::<TestEntity>::new(ServerConfig::default(), providers);
    let (mut world, steve) = world_with_steve();
    world.set_flag(&steve, VANISHED_FLAG_KEY, vec![true]);

    assert!(!server.oracle().is_cloaked(&world, &steve));
}

#[test]
fn server_asks_the_oracle_during_reconcile() {
    let mut harness = TestHarness::new();
    let _steve = harness.join_settled(1, "Steve");
    let before = harness.vanish.calls();

    let interval = harness.reconcile_interval();
    harness.tick_n(interval);

    assert!(harness.vanish.calls() > before);
}
