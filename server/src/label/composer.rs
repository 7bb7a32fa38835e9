use log::debug;

use nametag_shared::{
    AgentHandle, AgentId, ClanProvider, LabelText, NamedColor, PingSource, RankProvider,
};

use crate::{
    label::legacy::{last_color, parse_legacy},
    AppearanceConfig,
};

const DEFAULT_GROUP: &str = "default";

/// Builds label content from the optional rank, clan and ping providers.
///
/// A provider that is missing or fails simply leaves its part of the label
/// out for that agent.
pub struct LabelComposer {
    rank: Option<Box<dyn RankProvider>>,
    clan: Option<Box<dyn ClanProvider>>,
    ping: Option<Box<dyn PingSource>>,
    appearance: AppearanceConfig,
}

impl LabelComposer {
    pub fn new(appearance: AppearanceConfig) -> Self {
        Self {
            rank: None,
            clan: None,
            ping: None,
            appearance,
        }
    }

    pub fn set_rank_provider(&mut self, provider: Box<dyn RankProvider>) {
        self.rank = Some(provider);
    }

    pub fn set_clan_provider(&mut self, provider: Box<dyn ClanProvider>) {
        self.clan = Some(provider);
    }

    pub fn set_ping_source(&mut self, source: Box<dyn PingSource>) {
        self.ping = Some(source);
    }

    /// Whether labels are mirrored into the connected-agents list
    pub fn mirrors_list_name(&self) -> bool {
        self.appearance.tab_list_display
    }

    /// Overlay content: the clan on the first line when known, then
    /// `rank name [ping]`
    pub fn compose(&self, agent: &AgentHandle) -> LabelText {
        let mut text = LabelText::new();

        if let Some(clan) = self.clan_name(&agent.id) {
            text.append(parse_legacy(&clan));
            text.newline();
        }

        let prefix = self.rank_prefix(&agent.id);
        self.push_rank_and_name(&mut text, agent, prefix.as_deref());

        if self.appearance.ping_enabled {
            if let Some(ping) = self.ping(&agent.id) {
                text.push_text(" ")
                    .push_colored("[", NamedColor::Gray)
                    .push_colored(&format!("{}ms", ping), ping_color(ping))
                    .push_colored("]", NamedColor::Gray);
            }
        }

        text
    }

    /// List-name content: `clan rank name` on one line, no ping
    pub fn compose_list_name(&self, agent: &AgentHandle) -> LabelText {
        let mut text = LabelText::new();

        if let Some(clan) = self.clan_name(&agent.id) {
            text.append(parse_legacy(&clan));
            text.push_text(" ");
        }

        let prefix = self.rank_prefix(&agent.id);
        self.push_rank_and_name(&mut text, agent, prefix.as_deref());

        text
    }

    fn push_rank_and_name(&self, text: &mut LabelText, agent: &AgentHandle, prefix: Option<&str>) {
        if let Some(prefix) = prefix {
            text.append(parse_legacy(prefix));
            if !prefix.ends_with(' ') {
                text.push_text(" ");
            }
        }

        let name_color = prefix
            .filter(|_| self.appearance.name_inherits_rank_color)
            .and_then(last_color)
            .unwrap_or(NamedColor::White);
        text.push_colored(&agent.name, name_color);
    }

    // Providers

    fn clan_name(&self, agent_id: &AgentId) -> Option<String> {
        let provider = self.clan.as_ref()?;
        let key = self.appearance.clan_placeholder.as_str();
        match provider.clan_name(agent_id, key) {
            Ok(Some(name)) if !name.is_empty() && name != key => Some(name),
            Ok(_) => None,
            Err(error) => {
                debug!("no clan for {}: {}", agent_id, error);
                None
            }
        }
    }

    fn rank_prefix(&self, agent_id: &AgentId) -> Option<String> {
        let provider = self.rank.as_ref()?;
        let rank = match provider.rank(agent_id) {
            Ok(rank) => rank,
            Err(error) => {
                debug!("no rank for {}: {}", agent_id, error);
                return None;
            }
        };

        if let Some(prefix) = rank.prefix.filter(|prefix| !prefix.is_empty()) {
            return Some(prefix);
        }

        let group = rank.primary_group?;
        if group.is_empty() || group.eq_ignore_ascii_case(DEFAULT_GROUP) {
            return None;
        }
        Some(format!("§7[{}]", capitalize(&group)))
    }

    fn ping(&self, agent_id: &AgentId) -> Option<u32> {
        let source = self.ping.as_ref()?;
        match source.ping_ms(agent_id) {
            Ok(ping) => Some(ping),
            Err(error) => {
                debug!("no ping for {}: {}", agent_id, error);
                None
            }
        }
    }
}

/// Green under 50ms, yellow under 100ms, gold under 200ms, red beyond
pub fn ping_color(ping_ms: u32) -> NamedColor {
    match ping_ms {
        0..=49 => NamedColor::Green,
        50..=99 => NamedColor::Yellow,
        100..=199 => NamedColor::Gold,
        _ => NamedColor::Red,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
