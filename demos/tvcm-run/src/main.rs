//! tvcm-run: runs the community walk, with and without the meeting overlay,
//! and writes per-run CSV output.
//!
//! Usage: `tvcm-run [scenario.toml]`.  Without an argument the library
//! defaults are used (505 nodes on a 6 × 6 grid for one day).  Set
//! `RUST_LOG=debug` to see slot transitions.

mod scenario;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tvcm_core::{CellId, NodeId, Tick, Vec2};
use tvcm_mobility::Mobility;
use tvcm_output::{CsvWriter, OutputWriter, SimOutputObserver, write_homes};
use tvcm_sim::{Sim, SimBuilder, SimObserver};
use tvcm_spatial::ContactSet;

use scenario::Scenario;

// ── Contact tally ─────────────────────────────────────────────────────────────

/// Wraps the output observer and splits contacts by community.
struct ContactTally<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    homes:         Vec<CellId>,
    intra:         u64,
    inter:         u64,
    peak:          usize,
    snapshot_rows: usize,
}

impl<W: OutputWriter> ContactTally<W> {
    fn new<M: Mobility>(inner: SimOutputObserver<W>, model: &M) -> Self {
        let homes = (0..model.node_count()).map(|i| model.home_cell(NodeId(i as u32))).collect();
        Self { inner, homes, intra: 0, inter: 0, peak: 0, snapshot_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ContactTally<W> {
    fn on_tick_end(&mut self, tick: Tick, time_secs: f64, contacts: &ContactSet) {
        for (a, b) in contacts {
            if self.homes[a.index()] == self.homes[b.index()] {
                self.intra += 1;
            } else {
                self.inter += 1;
            }
        }
        self.peak = self.peak.max(contacts.len());
        self.inner.on_tick_end(tick, time_secs, contacts);
    }

    fn on_snapshot(&mut self, tick: Tick, time_secs: f64, positions: &[Vec2]) {
        self.snapshot_rows += positions.len();
        self.inner.on_snapshot(tick, time_secs, positions);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Runs ──────────────────────────────────────────────────────────────────────

fn record<M: Mobility>(label: &str, sim: &mut Sim<M>, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    write_homes(dir, &sim.model)?;
    let writer = CsvWriter::new(dir)?;
    let mut obs = ContactTally::new(SimOutputObserver::new(writer), &sim.model);

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("[{label}] complete in {:.3} s", elapsed.as_secs_f64());
    println!("  ticks               : {}", sim.tick().0);
    println!("  contact-ticks       : {} intra / {} inter", obs.intra, obs.inter);
    println!("  peak pairs per tick : {}", obs.peak);
    println!("  positions.csv       : {} rows", obs.snapshot_rows);
    println!("  output              : {}", dir.display());
    println!();
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::from_file(Path::new(&path))?,
        None => Scenario::default(),
    };
    scenario.validate()?;

    let m = &scenario.mobility;
    println!("=== tvcm-run: community walk with friend meetings ===");
    println!(
        "Nodes: {}  |  Grid: {} × {} ({} m cells)  |  Communities: {}  |  Seed: {}",
        m.nodes, m.grid_x, m.grid_y, m.cell_size, m.communities, m.seed
    );
    println!(
        "Duration: {} s at dt = {} s ({} ticks)",
        scenario.run.duration_secs,
        scenario.run.dt_secs,
        scenario.run.total_ticks()
    );
    println!();

    // 1. Plain waypoint walk.
    let mut plain = SimBuilder::new(scenario.mobility.clone(), scenario.run.clone()).build_plain()?;
    record("plain", &mut plain, &scenario.output_dir.join("plain"))?;

    // 2. Same population with friend meetings.
    if scenario.social_enabled {
        let mut social = SimBuilder::new(scenario.mobility.clone(), scenario.run.clone())
            .social(scenario.social.clone())
            .build_social()?;
        let overlay = &social.model;
        info!(
            groups = overlay.groups().len(),
            colors = overlay.schedule().color_count(),
            collisions = overlay.collision_count(),
            "meeting schedule ready"
        );
        record("social", &mut social, &scenario.output_dir.join("social"))?;
    }

    Ok(())
}
