//! Label content: what gets rendered and when it is written again.

use std::thread;

use nametag_server::{AppearanceConfig, ServerConfig};
use nametag_shared::{AgentId, NamedColor, RankInfo};
use nametag_test::TestHarness;

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

fn label_of(harness: &TestHarness, agent_id: &AgentId) -> String {
    let entity = harness.overlay_of(agent_id).unwrap();
    harness.world.overlay(&entity).unwrap().text.plain()
}

fn text_writes(harness: &TestHarness, agent_id: &AgentId) -> usize {
    let entity = harness.overlay_of(agent_id).unwrap();
    harness.world.overlay(&entity).unwrap().text_writes
}

fn update_ticks(harness: &TestHarness) -> u64 {
    harness.server.config().timing.update_ticks()
}

fn decorated_harness() -> (TestHarness, AgentId) {
    let mut harness = TestHarness::new();
    let steve = AgentId::from_u64(1);
    harness.ranks.set(&steve, RankInfo::with_prefix("§c[Admin]"));
    harness.clans.set(&steve, "Knights");
    harness.pings.set(&steve, 20);
    harness.join_settled(1, "Steve");
    (harness, steve)
}

#[test]
fn full_label_has_clan_rank_name_and_ping() {
    init_logging();
    let (harness, steve) = decorated_harness();

    assert_eq!(label_of(&harness, &steve), "Knights\n[Admin] Steve [20ms]");

    let entity = harness.overlay_of(&steve).unwrap();
    let text = &harness.world.overlay(&entity).unwrap().text;
    let name = text
        .spans()
        .iter()
        .find(|span| span.text == "Steve")
        .unwrap();
    assert_eq!(name.color, Some(NamedColor::Red));
    let ping = text.spans().iter().find(|span| span.text == "20ms").unwrap();
    assert_eq!(ping.color, Some(NamedColor::Green));
}

#[test]
fn bare_label_is_just_the_name() {
    let mut harness = TestHarness::new();
    let steve = harness.join_settled(1, "Steve");

    assert_eq!(label_of(&harness, &steve), "Steve");
}

#[test]
fn group_stands_in_for_a_missing_prefix() {
    let mut harness = TestHarness::new();
    let steve = AgentId::from_u64(1);
    let alex = AgentId::from_u64(2);
    harness.ranks.set(&steve, RankInfo::with_group("moderator"));
    harness.ranks.set(&alex, RankInfo::with_group("default"));
    harness.join_settled(1, "Steve");
    harness.join_settled(2, "Alex");

    assert_eq!(label_of(&harness, &steve), "[Moderator] Steve");
    assert_eq!(label_of(&harness, &alex), "Alex");
}

#[test]
fn unchanged_label_is_not_written_again() {
    let (mut harness, steve) = decorated_harness();
    assert_eq!(text_writes(&harness, &steve), 1);

    let ticks = update_ticks(&harness);
    let reports = harness.tick_n(ticks);

    assert!(reports.iter().any(|report| report.refreshed == Some(1)));
    assert_eq!(text_writes(&harness, &steve), 1);
}

#[test]
fn refresh_picks_up_a_new_ping() {
    let (mut harness, steve) = decorated_harness();

    harness.pings.set(&steve, 150);
    let ticks = update_ticks(&harness);
    harness.tick_n(ticks);

    assert_eq!(label_of(&harness, &steve), "Knights\n[Admin] Steve [150ms]");
    assert_eq!(text_writes(&harness, &steve), 2);
}

#[test]
fn profile_change_renders_immediately() {
    let (mut harness, steve) = decorated_harness();

    harness.clans.set(&steve, "Rogues");
    harness.server.on_profile_changed(&mut harness.world, &steve);

    assert_eq!(label_of(&harness, &steve), "Rogues\n[Admin] Steve [20ms]");
}

#[test]
fn ping_can_be_switched_off() {
    let config = ServerConfig {
        appearance: AppearanceConfig {
            ping_enabled: false,
            ..AppearanceConfig::default()
        },
        ..ServerConfig::default()
    };
    let mut harness = TestHarness::with_config(config);
    let steve = AgentId::from_u64(1);
    harness.pings.set(&steve, 20);
    harness.join_settled(1, "Steve");

    assert_eq!(label_of(&harness, &steve), "Steve");
}

#[test]
fn list_name_mirrors_the_label_without_ping() {
    let config = ServerConfig {
        appearance: AppearanceConfig {
            tab_list_display: true,
            ..AppearanceConfig::default()
        },
        ..ServerConfig::default()
    };
    let mut harness = TestHarness::with_config(config);
    let steve = AgentId::from_u64(1);
    harness.ranks.set(&steve, RankInfo::with_prefix("§c[Admin]"));
    harness.clans.set(&steve, "Knights");
    harness.pings.set(&steve, 20);
    harness.join_settled(1, "Steve");

    let list_name = harness
        .world
        .test_agent(&steve)
        .and_then(|agent| agent.list_name.clone())
        .unwrap();
    assert_eq!(list_name.plain(), "Knights [Admin] Steve");
}

#[test]
fn notification_from_another_thread_lands_on_the_next_tick() {
    init_logging();
    let (mut harness, steve) = decorated_harness();
    harness.clans.set(&steve, "Rogues");

    let notifier = harness.server.notifier();
    thread::spawn(move || {
        notifier.profile_changed(steve);
    })
    .join()
    .unwrap();

    assert_eq!(label_of(&harness, &steve), "Knights\n[Admin] Steve [20ms]");
    let report = harness.tick();
    assert_eq!(report.notifications, 1);
    assert_eq!(label_of(&harness, &steve), "Rogues\n[Admin] Steve [20ms]");
}
