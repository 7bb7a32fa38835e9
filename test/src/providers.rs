//! Providers whose answers a test can change after handing them to a server

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    rc::Rc,
};

use nametag_shared::{
    AgentId, ClanProvider, PingSource, ProviderError, RankInfo, RankProvider, VanishProvider,
};

// ScriptedVanish
#[derive(Clone, Default)]
pub struct ScriptedVanish {
    hidden: Rc<RefCell<HashSet<AgentId>>>,
    failing: Rc<Cell<bool>>,
    calls: Rc<Cell<usize>>,
}

impl ScriptedVanish {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hide(&self, agent_id: &AgentId) {
        self.hidden.borrow_mut().insert(*agent_id);
    }

    pub fn show(&self, agent_id: &AgentId) {
        self.hidden.borrow_mut().remove(agent_id);
    }

    pub fn is_cloaked(&self, agent_id: &AgentId) -> bool {
        self.hidden.borrow().contains(agent_id)
    }

    /// Makes every call fail until switched back
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl VanishProvider for ScriptedVanish {
    fn is_hidden(&self, agent_id: &AgentId) -> Result<bool, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        if self.failing.get() {
            return Err(ProviderError::Unavailable { provider: "vanish" });
        }
        Ok(self.hidden.borrow().contains(agent_id))
    }
}

// ScriptedRanks
#[derive(Clone, Default)]
pub struct ScriptedRanks {
    ranks: Rc<RefCell<HashMap<AgentId, RankInfo>>>,
}

impl ScriptedRanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, agent_id: &AgentId, rank: RankInfo) {
        self.ranks.borrow_mut().insert(*agent_id, rank);
    }
}

impl RankProvider for ScriptedRanks {
    fn rank(&self, agent_id: &AgentId) -> Result<RankInfo, ProviderError> {
        self.ranks
            .borrow()
            .get(agent_id)
            .cloned()
            .ok_or(ProviderError::Failed {
                provider: "ranks",
                reason: format!("no rank for {}", agent_id),
            })
    }
}

// ScriptedClans
#[derive(Clone, Default)]
pub struct ScriptedClans {
    clans: Rc<RefCell<HashMap<AgentId, String>>>,
}

impl ScriptedClans {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, agent_id: &AgentId, clan: &str) {
        self.clans.borrow_mut().insert(*agent_id, clan.to_string());
    }
}

impl ClanProvider for ScriptedClans {
    /// Unknown agents resolve to the raw key, the way an unresolved
    /// placeholder does
    fn clan_name(&self, agent_id: &AgentId, key: &str) -> Result<Option<String>, ProviderError> {
        let name = self
            .clans
            .borrow()
            .get(agent_id)
            .cloned()
            .unwrap_or_else(|| key.to_string());
        Ok(Some(name))
    }
}

// ScriptedPings
#[derive(Clone, Default)]
pub struct ScriptedPings {
    pings: Rc<RefCell<HashMap<AgentId, u32>>>,
}

impl ScriptedPings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, agent_id: &AgentId, ping_ms: u32) {
        self.pings.borrow_mut().insert(*agent_id, ping_ms);
    }
}

impl PingSource for ScriptedPings {
    fn ping_ms(&self, agent_id: &AgentId) -> Result<u32, ProviderError> {
        self.pings
            .borrow()
            .get(agent_id)
            .copied()
            .ok_or(ProviderError::Unavailable { provider: "pings" })
    }
}
