//! Proximity ("contact") detection over a position snapshot.
//!
//! Every call bulk-loads a fresh R-tree (O(N log N)) and runs one
//! within-distance query per node.  No index state survives between calls.
//!
//! A pair `(i, j)` is reported once, canonicalised with `i < j`, when the
//! Euclidean distance is **strictly** less than the radius.

use std::collections::BTreeSet;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use tvcm_core::{NodeId, Vec2};

/// Canonical, ordered set of unordered node pairs (`a < b`).
pub type ContactSet = BTreeSet<(NodeId, NodeId)>;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D point with the owning node's id.
#[derive(Clone, Debug)]
struct IndexedNode {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for IndexedNode {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexedNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── ContactDetector ───────────────────────────────────────────────────────────

/// Stateless range query with a fixed contact radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactDetector {
    radius: f64,
}

impl ContactDetector {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// All node pairs closer than the radius.  `positions[i]` is the position
    /// of `NodeId(i)`.
    pub fn detect(&self, positions: &[Vec2]) -> ContactSet {
        let entries: Vec<IndexedNode> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| IndexedNode { point: p.to_array(), id: NodeId(i as u32) })
            .collect();
        let tree = RTree::bulk_load(entries);
        let r2 = self.radius * self.radius;

        #[cfg(not(feature = "parallel"))]
        {
            let mut pairs = ContactSet::new();
            for (i, p) in positions.iter().enumerate() {
                neighbours_above(&tree, NodeId(i as u32), *p, r2, |pair| {
                    pairs.insert(pair);
                });
            }
            pairs
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            positions
                .par_iter()
                .enumerate()
                .flat_map_iter(|(i, p)| {
                    let mut found = Vec::new();
                    neighbours_above(&tree, NodeId(i as u32), *p, r2, |pair| found.push(pair));
                    found
                })
                .collect::<Vec<_>>()
                .into_iter()
                .collect()
        }
    }
}

/// Visit every `(id, other)` with `other > id` strictly inside the radius.
///
/// Restricting to larger ids emits each unordered pair exactly once.
fn neighbours_above(
    tree: &RTree<IndexedNode>,
    id: NodeId,
    center: Vec2,
    r2: f64,
    mut visit: impl FnMut((NodeId, NodeId)),
) {
    for other in tree.locate_within_distance(center.to_array(), r2) {
        if other.id > id && other.distance_2(&center.to_array()) < r2 {
            visit((id, other.id));
        }
    }
}
