//! # Nametag Server
//! Keeps a single floating name overlay attached to every online agent of a
//! live multiplayer world, and keeps it consistent with the agent's
//! life-cycle (alive, dead, cloaked, offline) despite late, duplicated or
//! reordered notifications.
//!
//! Event handlers give the low-latency path; a periodic reconcile pass and a
//! slower orphan sweep bound how long any inconsistency or leaked overlay can
//! survive.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use nametag_shared::{
        AgentHandle, AgentId, LabelText, OverlayStyle, OverlayTag, Tick, WorldError, WorldId,
        WorldMutType, WorldRefType,
    };
}

mod context;
mod error;
mod events;
mod label;
mod schedule;
mod server;
mod state;
mod sweep;
mod timer;
mod vanish;

pub use error::NametagServerError;
pub use events::{LifecycleEvent, Notifier};
pub use label::{label_hash, last_color, parse_legacy, ping_color, LabelComposer};
pub use schedule::{DeferredAction, DeferredQueue, DeferredTask, Precondition};
pub use server::{
    AppearanceConfig, OverlayServer, Providers, ServerConfig, TickReport, TimingConfig,
};
pub use state::{
    agent_record::AgentRecord,
    life_state::{LifeState, TransitionEffect},
    state_tracker::StateTracker,
};
pub use sweep::{ReconcileReport, SweepReport};
pub use vanish::{VanishOracle, VanishSource};
