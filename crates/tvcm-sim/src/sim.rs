//! The `Sim` struct and its tick loop.

use tracing::{debug, info};

use tvcm_core::{RunConfig, Tick};
use tvcm_mobility::Mobility;

use crate::{SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<M>` owns a mobility model and drives it one fixed `dt` step per tick:
/// advance, detect contacts, report.  `M` is either the plain
/// [`MobilityEngine`][tvcm_mobility::MobilityEngine] or a wrapper such as
/// [`SocialOverlay`][tvcm_social::SocialOverlay].
///
/// Create via [`SimBuilder`][crate::SimBuilder] or [`Sim::new`].
pub struct Sim<M: Mobility> {
    /// Duration, step length and snapshot cadence.
    pub config: RunConfig,

    /// The model being driven.
    pub model: M,

    /// Next tick to execute.
    tick: Tick,
}

impl<M: Mobility> Sim<M> {
    /// Wrap an already-built model.
    pub fn new(config: RunConfig, model: M) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config, model, tick: Tick::ZERO })
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Next tick to execute.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Simulated seconds elapsed so far.
    #[inline]
    pub fn time_secs(&self) -> f64 {
        self.tick.0 as f64 * self.config.dt_secs
    }

    /// Run the simulation from the current tick to `config.total_ticks()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = Tick(self.config.total_ticks());
        info!(
            nodes = self.model.node_count(),
            ticks = end.0.saturating_sub(self.tick.0),
            dt_secs = self.config.dt_secs,
            "simulation started"
        );
        while self.tick < end {
            self.process_tick(observer)?;
        }
        observer.on_sim_end(self.tick);
        info!(final_tick = %self.tick, time_secs = self.time_secs(), "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores the
    /// configured duration).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.process_tick(observer)?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.tick;
        observer.on_tick_start(now);

        let positions = self.model.advance(self.config.dt_secs)?;
        let contacts = self.model.contacts(&positions);

        self.tick = now + 1;
        let time_secs = self.time_secs();
        debug!(tick = %now, time_secs, contacts = contacts.len(), "tick complete");

        observer.on_tick_end(now, time_secs, &contacts);
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, time_secs, &positions);
        }
        Ok(())
    }
}
