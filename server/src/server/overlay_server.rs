use std::hash::Hash;

use log::{debug, info};

use nametag_shared::{AgentId, Tick, WorldId, WorldMutType};

use crate::{
    context::OverlayContext,
    events::{EventIngestor, LifecycleEvent, NotificationQueue, Notifier},
    label::LabelComposer,
    schedule::DeferredQueue,
    state::state_tracker::StateTracker,
    sweep::{OrphanSweeper, ReconcileReport, Reconciler, SweepReport},
    timer::Timer,
    vanish::VanishOracle,
    LifeState, Providers, ServerConfig,
};

/// What happened during one call to `tick`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: Tick,
    pub notifications: usize,
    pub deferred: usize,
    pub reconcile: Option<ReconcileReport>,
    pub orphan_sweep: Option<SweepReport>,
    /// Overlays whose content was re-rendered by the refresh timer
    pub refreshed: Option<usize>,
}

/// Keeps one overlay attached to every online agent, in step with its
/// life-cycle state.
///
/// The server owns all engine state and must be driven from the host's tick
/// context: call `tick` once per host tick and the `on_*` handlers as the
/// host observes events. Notifications from other threads go through a
/// `Notifier`.
pub struct OverlayServer<E: Copy + Eq + Hash + Send> {
    // Config
    config: ServerConfig,
    // Engine
    ctx: OverlayContext<E>,
    ingestor: EventIngestor,
    reconciler: Reconciler,
    orphan_sweeper: OrphanSweeper,
    // Events
    notifications: NotificationQueue<E>,
    // Ticks
    reconcile_timer: Timer,
    orphan_sweep_timer: Timer,
    refresh_timer: Timer,
}

impl<E: Copy + Eq + Hash + Send> OverlayServer<E> {
    /// Create a new OverlayServer
    pub fn new(server_config: ServerConfig, mut providers: Providers) -> Self {
        let config = server_config.validated();

        let oracle = providers.take_oracle();
        let mut composer = LabelComposer::new(config.appearance.clone());
        if let Some(provider) = providers.rank.take() {
            composer.set_rank_provider(provider);
        }
        if let Some(provider) = providers.clan.take() {
            composer.set_clan_provider(provider);
        }
        if let Some(source) = providers.ping.take() {
            composer.set_ping_source(source);
        }

        let ctx = OverlayContext {
            tracker: StateTracker::new(config.appearance.overlay_style()),
            oracle,
            composer,
            deferred: DeferredQueue::new(),
            now: 0,
        };

        let timing = &config.timing;
        let reconcile_timer = Timer::new(timing.reconcile_ticks(), 0);
        let orphan_sweep_timer = Timer::new(timing.orphan_sweep_ticks(), 0);
        let refresh_timer = Timer::new(timing.update_ticks(), 0);

        Self {
            ingestor: EventIngestor::new(&config),
            config,
            ctx,
            reconciler: Reconciler::new(),
            orphan_sweeper: OrphanSweeper::new(),
            notifications: NotificationQueue::new(),
            reconcile_timer,
            orphan_sweep_timer,
            refresh_timer,
        }
    }

    /// Clears overlays left over from a previous run, then treats every agent
    /// already online as if it had just joined
    pub fn start<W: WorldMutType<E>>(&mut self, world: &mut W) {
        self.orphan_sweeper.sweep(&mut self.ctx, world);

        let online = world.online_agents();
        for agent_id in &online {
            self.ingestor.on_join(&mut self.ctx, world, agent_id);
        }
        info!("overlay server started with {} agent(s) online", online.len());
    }

    /// Advances one tick: drains pushed notifications, fires due deferred
    /// tasks, then runs whichever sweeps are due
    pub fn tick<W: WorldMutType<E>>(&mut self, world: &mut W) -> TickReport {
        self.ctx.now += 1;
        let now = self.ctx.now;
        let mut report = TickReport {
            tick: now,
            ..TickReport::default()
        };

        let notifications = self.notifications.drain();
        report.notifications = notifications.len();
        for event in notifications {
            self.ingestor.handle(&mut self.ctx, world, event);
        }

        let due = self.ctx.deferred.take_due(now);
        report.deferred = due.len();
        for task in due {
            self.ingestor.run_deferred(&mut self.ctx, world, task);
        }

        if self.reconcile_timer.ringing(now) {
            self.reconcile_timer.reset(now);
            report.reconcile = Some(self.reconciler.sweep(&mut self.ctx, world));
        }

        if self.orphan_sweep_timer.ringing(now) {
            self.orphan_sweep_timer.reset(now);
            report.orphan_sweep = Some(self.orphan_sweeper.sweep(&mut self.ctx, world));
        }

        if self.refresh_timer.ringing(now) {
            self.refresh_timer.reset(now);
            report.refreshed = Some(self.refresh(world));
        }

        report
    }

    /// Tears down every overlay, then sweeps once more for anything left
    pub fn shutdown<W: WorldMutType<E>>(&mut self, world: &mut W) {
        let agents = self.ctx.tracker.len();
        self.ctx.tracker.shutdown(world);
        self.ctx.deferred.clear();
        let report = self.orphan_sweeper.sweep(&mut self.ctx, world);
        info!(
            "overlay server shut down, {} record(s) dropped, {} stray overlay(s) removed",
            agents,
            report.removed()
        );
    }

    /// A handle for pushing notifications from other threads
    pub fn notifier(&self) -> Notifier<E> {
        self.notifications.notifier()
    }

    // Handlers

    pub fn handle<W: WorldMutType<E>>(&mut self, world: &mut W, event: LifecycleEvent<E>) {
        self.ingestor.handle(&mut self.ctx, world, event);
    }

    pub fn on_join<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId) {
        self.ingestor.on_join(&mut self.ctx, world, agent_id);
    }

    pub fn on_quit<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId) {
        self.ingestor.on_quit(&mut self.ctx, world, agent_id);
    }

    pub fn on_death<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId) {
        self.ingestor.on_death(&mut self.ctx, world, agent_id);
    }

    pub fn on_respawn<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId) {
        self.ingestor.on_respawn(&mut self.ctx, world, agent_id);
    }

    pub fn on_world_change<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        agent_id: &AgentId,
        from: &WorldId,
    ) {
        self.ingestor
            .on_world_change(&mut self.ctx, world, agent_id, from);
    }

    pub fn on_teleport(&mut self, agent_id: &AgentId) {
        self.ingestor.on_teleport(&mut self.ctx, agent_id);
    }

    pub fn on_sneak<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId, sneaking: bool) {
        self.ingestor.on_sneak(&mut self.ctx, world, agent_id, sneaking);
    }

    pub fn on_cloak_on<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId) {
        self.ingestor.on_cloak_on(&mut self.ctx, world, agent_id);
    }

    pub fn on_cloak_off(&mut self, agent_id: &AgentId) {
        self.ingestor.on_cloak_off(&mut self.ctx, agent_id);
    }

    pub fn on_detached<W: WorldMutType<E>>(&mut self, world: &mut W, entity: &E) {
        self.ingestor.on_detached(&mut self.ctx, world, entity);
    }

    pub fn on_profile_changed<W: WorldMutType<E>>(&mut self, world: &mut W, agent_id: &AgentId) {
        self.ingestor.on_profile_changed(&mut self.ctx, world, agent_id);
    }

    // Sweeps

    /// Runs a reconcile pass now, outside its timer
    pub fn reconcile<W: WorldMutType<E>>(&mut self, world: &mut W) -> ReconcileReport {
        self.reconciler.sweep(&mut self.ctx, world)
    }

    /// Runs an orphan sweep now, outside its timer
    pub fn sweep_orphans<W: WorldMutType<E>>(&mut self, world: &mut W) -> SweepReport {
        self.orphan_sweeper.sweep(&mut self.ctx, world)
    }

    /// Re-renders the content of every live overlay of an alive agent
    fn refresh<W: WorldMutType<E>>(&mut self, world: &mut W) -> usize {
        let mut refreshed = 0;
        for agent_id in self.ctx.tracker.agent_ids() {
            let alive = self
                .ctx
                .tracker
                .get(&agent_id)
                .is_some_and(|record| record.state() == LifeState::Alive);
            if !alive {
                continue;
            }
            self.ctx.render(world, &agent_id);
            refreshed += 1;
        }
        if refreshed > 0 {
            debug!("refreshed {} overlay(s)", refreshed);
        }
        refreshed
    }

    // Accessors

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Ticks elapsed since the server was created
    pub fn now(&self) -> Tick {
        self.ctx.now
    }

    pub fn tracker(&self) -> &StateTracker<E> {
        &self.ctx.tracker
    }

    pub fn oracle(&self) -> &VanishOracle {
        &self.ctx.oracle
    }

    /// Deferred tasks not yet fired
    pub fn pending_tasks(&self) -> usize {
        self.ctx.deferred.len()
    }

    pub fn pending_tasks_for(&self, agent_id: &AgentId) -> usize {
        self.ctx.deferred.pending_for(agent_id)
    }
}
