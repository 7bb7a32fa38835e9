use std::hash::Hash;

use log::debug;

use nametag_shared::{AgentId, VanishProvider, WorldRefType, VANISHED_FLAG_KEY};

/// One way of finding out whether an agent is cloaked
pub enum VanishSource {
    /// A dedicated vanish service. A successful answer is final.
    Primary(Box<dyn VanishProvider>),
    /// Boolean flags set on the agent under `key` by any plugin
    FallbackFlag { key: String },
}

impl VanishSource {
    pub fn fallback_flag() -> Self {
        Self::FallbackFlag {
            key: VANISHED_FLAG_KEY.to_string(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Primary(_) => "primary",
            Self::FallbackFlag { .. } => "fallback flag",
        }
    }
}

/// Resolves whether an agent is currently cloaked.
///
/// Sources are consulted in order. The first one that answers decides; a
/// source that fails hands over to the next one. An oracle with no sources,
/// or whose sources all fail, reports "not cloaked".
pub struct VanishOracle {
    sources: Vec<VanishSource>,
}

impl VanishOracle {
    /// An oracle with no detection at all
    pub fn none() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn new(sources: Vec<VanishSource>) -> Self {
        Self { sources }
    }

    /// The usual setup: a dedicated provider backed by the shared flag
    pub fn with_primary(provider: Box<dyn VanishProvider>) -> Self {
        Self::new(vec![
            VanishSource::Primary(provider),
            VanishSource::fallback_flag(),
        ])
    }

    pub fn fallback_only() -> Self {
        Self::new(vec![VanishSource::fallback_flag()])
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn is_cloaked<E: Copy + Eq + Hash, W: WorldRefType<E>>(
        &self,
        world: &W,
        agent_id: &AgentId,
    ) -> bool {
        for source in &self.sources {
            match source {
                VanishSource::Primary(provider) => match provider.is_hidden(agent_id) {
                    Ok(hidden) => return hidden,
                    Err(error) => {
                        debug!(
                            "{} source failed for {}: {}",
                            source.name(),
                            agent_id,
                            error
                        );
                    }
                },
                VanishSource::FallbackFlag { key } => {
                    return world.agent_flags(agent_id, key).into_iter().any(|flag| flag);
                }
            }
        }
        false
    }
}

impl Default for VanishOracle {
    fn default() -> Self {
        Self::fallback_only()
    }
}
