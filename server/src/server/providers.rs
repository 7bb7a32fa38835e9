use nametag_shared::{ClanProvider, PingSource, RankProvider, VanishProvider};

use crate::vanish::{VanishOracle, VanishSource};

/// The optional third-party services the server consults. Any of them may
/// be left out; the matching part of the label or detection is then absent.
#[derive(Default)]
pub struct Providers {
    pub vanish: Option<Box<dyn VanishProvider>>,
    /// Read the shared `vanished` flag when the vanish provider cannot answer
    pub vanish_flag_fallback: bool,
    pub rank: Option<Box<dyn RankProvider>>,
    pub clan: Option<Box<dyn ClanProvider>>,
    pub ping: Option<Box<dyn PingSource>>,
}

impl Providers {
    /// No providers, flag fallback enabled
    pub fn new() -> Self {
        Self {
            vanish_flag_fallback: true,
            ..Self::default()
        }
    }

    pub fn with_vanish(mut self, provider: impl VanishProvider + 'static) -> Self {
        self.vanish = Some(Box::new(provider));
        self
    }

    pub fn without_flag_fallback(mut self) -> Self {
        self.vanish_flag_fallback = false;
        self
    }

    pub fn with_rank(mut self, provider: impl RankProvider + 'static) -> Self {
        self.rank = Some(Box::new(provider));
        self
    }

    pub fn with_clan(mut self, provider: impl ClanProvider + 'static) -> Self {
        self.clan = Some(Box::new(provider));
        self
    }

    pub fn with_ping(mut self, source: impl PingSource + 'static) -> Self {
        self.ping = Some(Box::new(source));
        self
    }

    /// Builds the oracle from the vanish provider and the flag fallback,
    /// in that order
    pub(crate) fn take_oracle(&mut self) -> VanishOracle {
        let mut sources = Vec::new();
        if let Some(provider) = self.vanish.take() {
            sources.push(VanishSource::Primary(provider));
        }
        if self.vanish_flag_fallback {
            sources.push(VanishSource::fallback_flag());
        }
        VanishOracle::new(sources)
    }
}
