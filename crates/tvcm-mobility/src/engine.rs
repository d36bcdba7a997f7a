//! The waypoint-walk mobility engine.

use tracing::{info, trace};

use tvcm_core::{CellId, MobilityConfig, NodeId, SimRng, Vec2};
use tvcm_spatial::{CommunityLayout, ContactDetector, ContactSet, Grid};

use crate::{Mobility, MobilityError, MobilityResult, NodeState};

/// A node closer than this to its waypoint has arrived, metres.
pub const ARRIVAL_EPS: f64 = 1e-2;

/// A waypoint closer than this to the node cannot define a direction, metres.
pub const DEGENERATE_EPS: f64 = 1e-6;

/// Waypoint draws attempted before giving up on a node.
pub const MAX_WAYPOINT_ATTEMPTS: u32 = 64;

/// Per-node 2-state Markov waypoint chooser plus an explicit Euler
/// integrator.
///
/// Node state is stored as parallel arrays indexed by `NodeId`; use
/// [`state`](Self::state) for a per-node view.
///
/// # Randomness
///
/// All draws (community layout, stay probabilities, initial placement,
/// waypoints, speeds) come from the owned [`SimRng`].
pub struct MobilityEngine {
    config:   MobilityConfig,
    grid:     Grid,
    layout:   CommunityLayout,
    detector: ContactDetector,
    rng:      SimRng,

    // ── Per-node arrays ──────────────────────────────────────────────────
    stay_probability: Vec<f64>,
    position:         Vec<Vec2>,
    waypoint:         Vec<Vec2>,
    direction:        Vec<Vec2>,
    speed:            Vec<f64>,
    held:             Vec<bool>,
}

impl MobilityEngine {
    /// Build an engine seeded from `config.seed`.
    pub fn new(config: MobilityConfig) -> MobilityResult<Self> {
        let rng = SimRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Build an engine drawing from an injected generator.
    ///
    /// Draw order: community cells, every stay probability, every initial
    /// position, then one waypoint per node in id order.
    pub fn with_rng(config: MobilityConfig, mut rng: SimRng) -> MobilityResult<Self> {
        config.validate()?;
        let grid = Grid::from_config(&config)?;
        let layout = CommunityLayout::new(&grid, config.communities, config.nodes, &mut rng)?;
        let n = layout.node_count();

        let stay_probability: Vec<f64> =
            (0..n).map(|_| rng.uniform_inclusive(config.stay_range)).collect();

        let mut position = Vec::with_capacity(n);
        for &home in layout.home_cells() {
            position.push(rng.point_in(&grid.cell_bounds(home)?));
        }

        let mut engine = Self {
            detector: ContactDetector::new(config.contact_radius),
            config,
            grid,
            layout,
            rng,
            stay_probability,
            position,
            waypoint:  vec![Vec2::ZERO; n],
            direction: vec![Vec2::ZERO; n],
            speed:     vec![0.0; n],
            held:      vec![false; n],
        };
        for i in 0..n {
            engine.select_next_waypoint(NodeId(i as u32))?;
        }

        info!(
            nodes = n,
            cells = engine.grid.cell_count(),
            communities = engine.layout.communities().len(),
            contact_radius = engine.config.contact_radius,
            "mobility engine initialised"
        );
        Ok(engine)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &MobilityConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &CommunityLayout {
        &self.layout
    }

    pub fn state(&self, node: NodeId) -> NodeState {
        let i = node.index();
        NodeState {
            home_cell:        self.layout.home_cell(node),
            stay_probability: self.stay_probability[i],
            position:         self.position[i],
            waypoint:         self.waypoint[i],
            direction:        self.direction[i],
            speed:            self.speed[i],
            held:             self.held[i],
        }
    }

    /// Overwrite the stay probability of `node`.  Intended for scenario
    /// setup before the first [`advance`](Mobility::advance).
    pub fn set_stay_probability(&mut self, node: NodeId, p: f64) {
        self.stay_probability[node.index()] = p.clamp(0.0, 1.0);
    }

    // ── Waypoint selection ────────────────────────────────────────────────

    /// Draw a new waypoint, direction and speed for `node`.
    ///
    /// Stays home with the node's stay probability, otherwise roams to a
    /// uniformly chosen cell other than home.  A target that coincides with
    /// the current position is redrawn, at most [`MAX_WAYPOINT_ATTEMPTS`]
    /// times.
    pub fn select_next_waypoint(&mut self, node: NodeId) -> MobilityResult<()> {
        let i = node.index();
        let home = self.layout.home_cell(node);

        for _ in 0..MAX_WAYPOINT_ATTEMPTS {
            let cell = self.next_cell(i, home);
            let target = self.rng.point_in(&self.grid.cell_bounds(cell)?);

            let Some(direction) = (target - self.position[i]).normalized(DEGENERATE_EPS) else {
                continue;
            };
            self.waypoint[i] = target;
            self.direction[i] = direction;
            self.speed[i] = self.rng.uniform_inclusive(self.config.speed_range);
            trace!(%node, %cell, roaming = cell != home, waypoint = %target, "waypoint selected");
            return Ok(());
        }

        Err(MobilityError::DegenerateWaypoint { node, attempts: MAX_WAYPOINT_ATTEMPTS })
    }

    /// The Markov step: home with probability `stay_probability[i]`.
    fn next_cell(&mut self, i: usize, home: CellId) -> CellId {
        if self.rng.random::<f64>() < self.stay_probability[i] {
            home
        } else {
            self.grid.random_cell_except(home, &mut self.rng)
        }
    }
}

impl Mobility for MobilityEngine {
    fn node_count(&self) -> usize {
        self.position.len()
    }

    fn home_cell(&self, node: NodeId) -> CellId {
        self.layout.home_cell(node)
    }

    fn positions(&self) -> &[Vec2] {
        &self.position
    }

    fn speed(&self, node: NodeId) -> f64 {
        self.speed[node.index()]
    }

    fn speed_range(&self) -> (f64, f64) {
        self.config.speed_range
    }

    /// Arrivals re-plan first, then every free node moves one Euler step and
    /// overshoots are snapped onto the waypoint.  Held nodes are skipped.
    fn advance(&mut self, dt: f64) -> MobilityResult<Vec<Vec2>> {
        for i in 0..self.position.len() {
            if !self.held[i] && self.position[i].distance(self.waypoint[i]) < ARRIVAL_EPS {
                self.select_next_waypoint(NodeId(i as u32))?;
            }
        }

        for i in 0..self.position.len() {
            if self.held[i] {
                continue;
            }
            self.position[i] += self.direction[i] * (self.speed[i] * dt);
            if (self.position[i] - self.waypoint[i]).dot(self.direction[i]) > 0.0 {
                self.position[i] = self.waypoint[i];
            }
        }

        Ok(self.position.clone())
    }

    fn contacts(&self, positions: &[Vec2]) -> ContactSet {
        self.detector.detect(positions)
    }

    fn freeze_at(&mut self, node: NodeId, at: Vec2) {
        let i = node.index();
        self.position[i] = at;
        self.speed[i] = 0.0;
        self.held[i] = true;
    }

    fn resume(&mut self, node: NodeId) -> f64 {
        let i = node.index();
        self.held[i] = false;
        self.speed[i] = self.rng.uniform_inclusive(self.config.speed_range);
        self.speed[i]
    }
}
