//! The `Mobility` capability trait.

use tvcm_core::{CellId, NodeId, Vec2};
use tvcm_spatial::ContactSet;

use crate::MobilityResult;

/// The minimal surface a movement model exposes to the layers that wrap it
/// and to the run loop.
///
/// Implemented by [`MobilityEngine`][crate::MobilityEngine] and by wrappers
/// such as `tvcm_social::SocialOverlay<M>`, so wrappers compose and tests can
/// substitute a stub.
///
/// # Mutation capability
///
/// Wrappers never touch the engine's arrays directly.  The only writes they
/// may perform are [`freeze_at`](Self::freeze_at) (pin a node at a point with
/// zero speed) and [`resume`](Self::resume) (release it with a fresh speed).
pub trait Mobility {
    /// Population size.  Node ids are dense in `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Fixed home cell of `node`.
    fn home_cell(&self, node: NodeId) -> CellId;

    /// Current positions, indexed by `NodeId`.
    fn positions(&self) -> &[Vec2];

    /// Current speed of `node`, metres per second.
    fn speed(&self, node: NodeId) -> f64;

    /// Closed range walking speeds are drawn from.
    fn speed_range(&self) -> (f64, f64);

    /// Integrate one step of `dt` seconds and return a copy of the resulting
    /// positions.
    fn advance(&mut self, dt: f64) -> MobilityResult<Vec<Vec2>>;

    /// Canonical node pairs within the contact radius over `positions`.
    fn contacts(&self, positions: &[Vec2]) -> ContactSet;

    /// [`contacts`](Self::contacts) over the model's own current positions.
    fn current_contacts(&self) -> ContactSet {
        self.contacts(self.positions())
    }

    /// Pin `node` at `at` with zero speed until [`resume`](Self::resume).
    fn freeze_at(&mut self, node: NodeId, at: Vec2);

    /// Release a pinned `node` and give it a fresh random speed, which is
    /// returned.  Waypoint and direction are left unchanged.
    fn resume(&mut self, node: NodeId) -> f64;
}
