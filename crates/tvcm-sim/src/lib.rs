//! `tvcm-sim`: tick loop that drives any [`Mobility`][tvcm_mobility::Mobility]
//! model and reports to an observer.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..run.total_ticks():
//!   ① on_tick_start(tick)
//!   ② positions = model.advance(dt)
//!   ③ contacts  = model.contacts(&positions)
//!   ④ on_tick_end(tick, t, &contacts)
//!   ⑤ on_snapshot(tick, t, &positions)     every snapshot_interval_ticks
//! on_sim_end(final_tick)
//! ```
//!
//! `t` is the simulated time at the *end* of the tick, `(tick + 1) · dt`.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs contact-detection queries on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tvcm_core::{MobilityConfig, RunConfig, SocialConfig};
//! use tvcm_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(MobilityConfig::default(), RunConfig::default())
//!     .social(SocialConfig::default())
//!     .build_social()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
