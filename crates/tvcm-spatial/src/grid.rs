//! Grid partition and home-community assignment.
//!
//! # Cell indexing
//!
//! Cells are addressed by a flat [`CellId`] over a `Gx × Gy` grid.  The flat
//! index is column-major in `gy`:
//!
//! ```text
//! gx = cell / Gy        gy = cell % Gy
//! bounds = [gx·size, (gx+1)·size) × [gy·size, (gy+1)·size)
//! ```
//!
//! # Communities
//!
//! [`CommunityLayout`] picks `n_comm` distinct cells uniformly at random and
//! hands out node ids in contiguous blocks: nodes `0..size_0` live in the
//! first community, the next `size_1` in the second, and so on.  Every block
//! holds `N / n_comm` nodes and the first block also absorbs the remainder.

use std::ops::Range;

use tvcm_core::{CellId, CoreError, MobilityConfig, NodeId, Rect, SimRng, Vec2};

use crate::{SpatialError, SpatialResult};

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Immutable partition of the simulation area into square cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    grid_x:    u32,
    grid_y:    u32,
    cell_size: f64,
}

impl Grid {
    /// Build a grid, rejecting empty dimensions and non-positive cell sizes.
    pub fn new(grid_x: u32, grid_y: u32, cell_size: f64) -> SpatialResult<Self> {
        if grid_x == 0 || grid_y == 0 {
            let msg = format!("grid must have at least one cell, got {grid_x}x{grid_y}");
            return Err(CoreError::config(msg).into());
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            let msg = format!("cell_size must be positive, got {cell_size}");
            return Err(CoreError::config(msg).into());
        }
        Ok(Self { grid_x, grid_y, cell_size })
    }

    pub fn from_config(config: &MobilityConfig) -> SpatialResult<Self> {
        Self::new(config.grid_x, config.grid_y, config.cell_size)
    }

    #[inline]
    pub fn cell_count(&self) -> u32 {
        self.grid_x * self.grid_y
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.grid_x, self.grid_y)
    }

    /// `(gx, gy)` grid coordinates of `cell`.
    #[inline]
    pub fn cell_coords(&self, cell: CellId) -> (u32, u32) {
        (cell.0 / self.grid_y, cell.0 % self.grid_y)
    }

    /// Rectangular region covered by `cell`.
    pub fn cell_bounds(&self, cell: CellId) -> SpatialResult<Rect> {
        if cell.0 >= self.cell_count() {
            return Err(SpatialError::CellOutOfRange { cell, cell_count: self.cell_count() });
        }
        let (gx, gy) = self.cell_coords(cell);
        let s = self.cell_size;
        Ok(Rect::new(
            Vec2::new(gx as f64 * s, gy as f64 * s),
            Vec2::new((gx + 1) as f64 * s, (gy + 1) as f64 * s),
        ))
    }

    /// The whole simulation area.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            Vec2::ZERO,
            Vec2::new(self.grid_x as f64 * self.cell_size, self.grid_y as f64 * self.cell_size),
        )
    }

    /// Cell containing `p`, or `None` outside the grid.
    pub fn cell_of(&self, p: Vec2) -> Option<CellId> {
        if !self.bounds().contains(p) {
            return None;
        }
        let gx = (p.x / self.cell_size) as u32;
        let gy = (p.y / self.cell_size) as u32;
        Some(CellId(gx.min(self.grid_x - 1) * self.grid_y + gy.min(self.grid_y - 1)))
    }

    /// Draw a cell uniformly from every cell except `excluded`.
    ///
    /// Returns `excluded` itself when the grid has a single cell: there is
    /// nowhere else to go.
    pub fn random_cell_except(&self, excluded: CellId, rng: &mut SimRng) -> CellId {
        let count = self.cell_count();
        if count <= 1 {
            return excluded;
        }
        let k = rng.gen_range(0..count - 1);
        CellId(if k >= excluded.0 { k + 1 } else { k })
    }
}

// ── CommunityLayout ───────────────────────────────────────────────────────────

/// Fixed node → home-cell mapping for the lifetime of a run.
#[derive(Clone, Debug)]
pub struct CommunityLayout {
    /// Home cell of each community, in draw order.
    communities: Vec<CellId>,

    /// Node-id range owned by each community (parallel to `communities`).
    blocks: Vec<Range<u32>>,

    /// Home cell per node, indexed by `NodeId`.
    home_of_node: Vec<CellId>,
}

impl CommunityLayout {
    /// Choose `n_comm` distinct home cells and split `nodes` across them.
    pub fn new(grid: &Grid, n_comm: u32, nodes: u32, rng: &mut SimRng) -> SpatialResult<Self> {
        if n_comm == 0 {
            return Err(CoreError::config("communities must be at least 1").into());
        }
        if n_comm > grid.cell_count() {
            return Err(CoreError::config(format!(
                "{n_comm} communities requested but the grid only has {} cells",
                grid.cell_count()
            ))
            .into());
        }
        if nodes == 0 {
            return Err(CoreError::config("population must contain at least one node").into());
        }

        let communities: Vec<CellId> = rng
            .sample_indices(grid.cell_count() as usize, n_comm as usize)
            .into_iter()
            .map(|c| CellId(c as u32))
            .collect();

        let base = nodes / n_comm;
        let remainder = nodes - base * n_comm;

        let mut blocks = Vec::with_capacity(communities.len());
        let mut home_of_node = Vec::with_capacity(nodes as usize);
        let mut start = 0u32;
        for (k, &cell) in communities.iter().enumerate() {
            let size = if k == 0 { base + remainder } else { base };
            blocks.push(start..start + size);
            home_of_node.extend(std::iter::repeat_n(cell, size as usize));
            start += size;
        }
        debug_assert_eq!(home_of_node.len(), nodes as usize);

        tracing::debug!(
            communities = communities.len(),
            nodes,
            per_community = base,
            remainder,
            "community layout drawn"
        );

        Ok(Self { communities, blocks, home_of_node })
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.home_of_node.len()
    }

    /// Home cell of `node`.
    #[inline]
    pub fn home_cell(&self, node: NodeId) -> CellId {
        self.home_of_node[node.index()]
    }

    /// Home cell of every node, indexed by `NodeId`.
    #[inline]
    pub fn home_cells(&self) -> &[CellId] {
        &self.home_of_node
    }

    /// The distinct community cells, in draw order.
    #[inline]
    pub fn communities(&self) -> &[CellId] {
        &self.communities
    }

    /// Nodes whose home is community `k` (index into [`communities`](Self::communities)).
    pub fn members(&self, k: usize) -> impl Iterator<Item = NodeId> + '_ {
        self.blocks[k].clone().map(NodeId)
    }

    /// `true` when both nodes share a home cell.
    #[inline]
    pub fn same_community(&self, a: NodeId, b: NodeId) -> bool {
        self.home_cell(a) == self.home_cell(b)
    }
}
