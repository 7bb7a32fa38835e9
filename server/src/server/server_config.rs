use std::{default::Default, time::Duration};

use log::warn;

use nametag_shared::{Argb, OverlayStyle, Tick};

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Sweep intervals and per-trigger settle delays
    pub timing: TimingConfig,
    /// How overlays look and what they display
    pub appearance: AppearanceConfig,
}

impl ServerConfig {
    /// Returns a copy with every out-of-range value clamped, logging a warning
    /// for each correction
    pub fn validated(&self) -> Self {
        Self {
            timing: self.timing.validated(),
            appearance: self.appearance.clone(),
        }
    }
}

/// Timing knobs. Durations are converted to whole ticks, never less than one.
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Length of one server tick
    pub tick_interval: Duration,
    /// How often the Reconciler re-validates every online agent (T1)
    pub reconcile_interval: Duration,
    /// How often the OrphanSweeper scans every world (T2, must exceed T1)
    pub orphan_sweep_interval: Duration,
    /// Seconds between label content refreshes, at least 1
    pub update_interval_secs: u32,
    /// Settle delay between a join and the first overlay
    pub join_settle_delay: Duration,
    /// Settle delay between a respawn and the new overlay
    pub respawn_settle_delay: Duration,
    /// Delay before recreating an overlay in the destination world
    pub world_change_delay: Duration,
    /// Delay before re-mounting an overlay after a teleport
    pub teleport_delay: Duration,
    /// Delay before the second stray scan after a quit
    pub quit_rescan_delay: Duration,
    /// Delay before re-verifying and restoring an overlay after a cloak-off
    pub cloak_off_delay: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            reconcile_interval: Duration::from_millis(500),
            orphan_sweep_interval: Duration::from_secs(2),
            update_interval_secs: 3,
            join_settle_delay: Duration::from_millis(500),
            respawn_settle_delay: Duration::from_millis(500),
            world_change_delay: Duration::from_millis(250),
            teleport_delay: Duration::from_millis(100),
            quit_rescan_delay: Duration::from_millis(250),
            cloak_off_delay: Duration::from_millis(250),
        }
    }
}

impl TimingConfig {
    /// Converts a duration into a whole number of ticks, rounding up and never
    /// returning less than one tick
    pub fn ticks(&self, duration: Duration) -> Tick {
        let tick_nanos = self.tick_interval.as_nanos().max(1);
        let ticks = duration.as_nanos().div_ceil(tick_nanos);
        Tick::try_from(ticks).unwrap_or(Tick::MAX).max(1)
    }

    pub fn reconcile_ticks(&self) -> Tick {
        self.ticks(self.reconcile_interval)
    }

    pub fn orphan_sweep_ticks(&self) -> Tick {
        self.ticks(self.orphan_sweep_interval)
    }

    pub fn update_ticks(&self) -> Tick {
        self.ticks(Duration::from_secs(u64::from(self.update_interval_secs.max(1))))
    }

    fn validated(&self) -> Self {
        let mut timing = self.clone();

        if timing.tick_interval.is_zero() {
            warn!("tick_interval was zero, set to 50ms");
            timing.tick_interval = Duration::from_millis(50);
        }

        if timing.update_interval_secs < 1 {
            warn!("update_interval_secs was too low, set to minimum of 1 second");
            timing.update_interval_secs = 1;
        }

        if timing.orphan_sweep_ticks() <= timing.reconcile_ticks() {
            let corrected = timing
                .reconcile_interval
                .checked_mul(4)
                .unwrap_or(Duration::MAX);
            warn!(
                "orphan_sweep_interval ({:?}) must exceed reconcile_interval ({:?}), set to {:?}",
                timing.orphan_sweep_interval, timing.reconcile_interval, corrected
            );
            timing.orphan_sweep_interval = corrected;
        }

        timing
    }
}

/// Appearance and content settings
#[derive(Clone, Debug)]
pub struct AppearanceConfig {
    /// Labels render through walls; also enables the sneak transformation
    pub see_through_walls: bool,
    /// Mirror the label (minus ping) into the connected-agents list
    pub tab_list_display: bool,
    pub vertical_offset: f32,
    pub scale: f32,
    /// Background opacity in `0.0..=1.0`, 0 disables the background
    pub background_opacity: f32,
    pub text_shadow: bool,
    /// Color the agent's name with the last color of its rank prefix
    pub name_inherits_rank_color: bool,
    /// Lookup key handed to the clan provider
    pub clan_placeholder: String,
    pub ping_enabled: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            see_through_walls: true,
            tab_list_display: false,
            vertical_offset: 0.3,
            scale: 1.0,
            background_opacity: 0.0,
            text_shadow: true,
            name_inherits_rank_color: true,
            clan_placeholder: "%clan_name%".to_string(),
            ping_enabled: true,
        }
    }
}

impl AppearanceConfig {
    /// The style every new overlay is spawned with
    pub fn overlay_style(&self) -> OverlayStyle {
        OverlayStyle {
            see_through: self.see_through_walls,
            shadowed: self.text_shadow,
            background: Argb::black_with_opacity(self.background_opacity),
            scale: self.scale,
            translation_y: self.vertical_offset,
            ..OverlayStyle::default()
        }
    }
}
