//! `tvcm-mobility`: per-node movement state and the waypoint-walk engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`model`]   | `Mobility`: capability trait implemented by every movement model |
//! | [`state`]   | `NodeState`: read-only snapshot of one node's kinematics         |
//! | [`engine`]  | `MobilityEngine`: 2-state Markov waypoint walk                   |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                              |
//!
//! # Movement model
//!
//! Each node walks in straight lines between waypoints:
//!
//! 1. On arrival (within [`ARRIVAL_EPS`] of the waypoint) the node picks its
//!    next target cell: its home cell with its personal stay probability,
//!    otherwise a uniformly random *other* cell.
//! 2. The waypoint is a uniform point in that cell; a fresh speed is drawn.
//! 3. Every tick the position advances by `direction × speed × dt`.  A node
//!    that passes its waypoint is snapped back onto it.
//!
//! Layers such as the social overlay wrap an engine through the [`Mobility`]
//! trait and may hold nodes in place with [`Mobility::freeze_at`].

pub mod engine;
pub mod error;
pub mod model;
pub mod state;

#[cfg(test)]
mod tests;

pub use engine::{ARRIVAL_EPS, DEGENERATE_EPS, MAX_WAYPOINT_ATTEMPTS, MobilityEngine};
pub use error::{MobilityError, MobilityResult};
pub use model::Mobility;
pub use state::NodeState;
