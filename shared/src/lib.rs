//! # Nametag Shared
//! Identifiers, host-world traits and provider traits shared between the
//! nametag-server engine and the host integrations that drive it.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod constants;
mod label;
mod providers;
mod types;
mod world;

pub use constants::{
    DEFAULT_LINE_WIDTH, DEFAULT_VIEW_RANGE, TEXT_OPACITY_FULL, TEXT_OPACITY_SNEAKING,
    VANISHED_FLAG_KEY,
};
pub use label::{Decorations, LabelText, NamedColor, TextSpan};
pub use providers::{
    error::ProviderError, ClanProvider, PingSource, RankInfo, RankProvider, VanishProvider,
};
pub use types::{AgentId, Tick, WorldId};
pub use world::{
    error::WorldError,
    overlay_style::{Argb, Billboard, OverlayStyle, TextAlignment},
    overlay_tag::OverlayTag,
    world_type::{AgentHandle, WorldMutType, WorldRefType},
};
