pub mod helpers;
pub mod providers;

pub use helpers::*;
pub use providers::{ScriptedClans, ScriptedPings, ScriptedRanks, ScriptedVanish};
pub use test_world::{TestAgent, TestEntity, TestOverlay, TestWorld};

pub use nametag_shared::{WorldMutType, WorldRefType};
