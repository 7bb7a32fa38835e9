use nametag_server::{OverlayServer, Providers, ServerConfig, TickReport};
use nametag_shared::{AgentId, Tick, WorldId};

use crate::{ScriptedClans, ScriptedPings, ScriptedRanks, ScriptedVanish, TestEntity, TestWorld};

/// A server, the world it drives and handles to every scripted provider
pub struct TestHarness {
    pub server: OverlayServer<TestEntity>,
    pub world: TestWorld,
    pub vanish: ScriptedVanish,
    pub ranks: ScriptedRanks,
    pub clans: ScriptedClans,
    pub pings: ScriptedPings,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let vanish = ScriptedVanish::new();
        let ranks = ScriptedRanks::new();
        let clans = ScriptedClans::new();
        let pings = ScriptedPings::new();

        let providers = Providers::new()
            .with_vanish(vanish.clone())
            .with_rank(ranks.clone())
            .with_clan(clans.clone())
            .with_ping(pings.clone());

        Self {
            server: OverlayServer::new(config, providers),
            world: TestWorld::new(),
            vanish,
            ranks,
            clans,
            pings,
        }
    }

    // Ticks

    pub fn tick(&mut self) -> TickReport {
        self.server.tick(&mut self.world)
    }

    pub fn tick_n(&mut self, ticks: Tick) -> Vec<TickReport> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    pub fn join_delay(&self) -> Tick {
        let timing = &self.server.config().timing;
        timing.ticks(timing.join_settle_delay)
    }

    pub fn reconcile_interval(&self) -> Tick {
        self.server.config().timing.reconcile_ticks()
    }

    pub fn orphan_sweep_interval(&self) -> Tick {
        self.server.config().timing.orphan_sweep_ticks()
    }

    // Agents

    /// Connects the agent to the overworld and reports the join
    pub fn join(&mut self, id: u64, name: &str) -> AgentId {
        let agent_id = AgentId::from_u64(id);
        self.world.connect(agent_id, name, TestWorld::OVERWORLD);
        self.server.on_join(&mut self.world, &agent_id);
        agent_id
    }

    /// Joins, then ticks through the settle delay
    pub fn join_settled(&mut self, id: u64, name: &str) -> AgentId {
        let agent_id = self.join(id, name);
        let delay = self.join_delay();
        self.tick_n(delay);
        agent_id
    }

    pub fn quit(&mut self, agent_id: &AgentId) {
        self.world.disconnect(agent_id);
        self.server.on_quit(&mut self.world, agent_id);
    }

    pub fn die(&mut self, agent_id: &AgentId) {
        self.world.kill(agent_id);
        self.server.on_death(&mut self.world, agent_id);
    }

    pub fn respawn(&mut self, agent_id: &AgentId) {
        self.world.revive(agent_id);
        self.server.on_respawn(&mut self.world, agent_id);
    }

    pub fn change_world(&mut self, agent_id: &AgentId, to: WorldId) {
        if let Some(from) = self.world.move_to(agent_id, to) {
            self.server.on_world_change(&mut self.world, agent_id, &from);
        }
    }

    /// Cloaks through the vanish provider and pushes the notification
    pub fn cloak(&mut self, agent_id: &AgentId) {
        self.vanish.hide(agent_id);
        self.server.on_cloak_on(&mut self.world, agent_id);
    }

    pub fn uncloak(&mut self, agent_id: &AgentId) {
        self.vanish.show(agent_id);
        self.server.on_cloak_off(agent_id);
    }

    /// The overlay the server tracks for the agent
    pub fn overlay_of(&self, agent_id: &AgentId) -> Option<TestEntity> {
        self.server.tracker().overlay(agent_id)
    }
}
