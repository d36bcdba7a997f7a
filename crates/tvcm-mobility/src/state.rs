//! Per-node kinematic snapshot.

use tvcm_core::{CellId, Vec2};

/// Read-only copy of one node's state, assembled from the engine's
/// per-node arrays.
///
/// `direction` is a unit vector once the first waypoint has been drawn.
/// `speed` lies in the configured range, except while `held` is set by a
/// layer above the engine, when it is exactly `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeState {
    pub home_cell:        CellId,
    pub stay_probability: f64,
    pub position:         Vec2,
    pub waypoint:         Vec2,
    pub direction:        Vec2,
    pub speed:            f64,
    /// Pinned in place by [`Mobility::freeze_at`][crate::Mobility::freeze_at].
    pub held:             bool,
}

impl NodeState {
    /// Distance left to the current waypoint.
    #[inline]
    pub fn remaining(&self) -> f64 {
        self.position.distance(self.waypoint)
    }
}
