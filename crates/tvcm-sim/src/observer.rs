//! Simulation observer trait for progress reporting and data collection.

use tvcm_core::{Tick, Vec2};
use tvcm_spatial::ContactSet;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example
///
/// ```rust,ignore
/// struct ContactCounter { total: usize }
///
/// impl SimObserver for ContactCounter {
///     fn on_tick_end(&mut self, _tick: Tick, _time_secs: f64, contacts: &ContactSet) {
///         self.total += contacts.len();
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the model advances.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the pairs in contact after the
    /// step.  `time_secs` is the simulated time at the end of the tick.
    fn on_tick_end(&mut self, _tick: Tick, _time_secs: f64, _contacts: &ContactSet) {}

    /// Called at snapshot intervals (every `snapshot_interval_ticks` ticks)
    /// with every node position, indexed by `NodeId`.
    fn on_snapshot(&mut self, _tick: Tick, _time_secs: f64, _positions: &[Vec2]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
