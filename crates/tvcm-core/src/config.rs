//! Typed configuration for the mobility engine, social overlay and run loop.
//!
//! Defaults reproduce the reference scenario: a 6 × 6 grid of 100 m cells,
//! ten home communities and 505 walkers, with friend groups meeting twice per
//! 24-slot day.  With the `serde` feature every field may be omitted from a
//! run file and falls back to its default.

use crate::{CoreError, CoreResult};

// ── MobilityConfig ────────────────────────────────────────────────────────────

/// Parameters of the grid, the population and the waypoint walk.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MobilityConfig {
    /// Cells along x (`Gx`).
    pub grid_x: u32,
    /// Cells along y (`Gy`).
    pub grid_y: u32,
    /// Side length of one square cell, metres.
    pub cell_size: f64,
    /// Number of distinct home cells.
    pub communities: u32,
    /// Total node population.
    pub nodes: u32,
    /// Closed range the per-node stay probability is drawn from.
    pub stay_range: (f64, f64),
    /// Closed range walking speeds are drawn from, metres per second.
    pub speed_range: (f64, f64),
    /// Two nodes closer than this (strictly) are in contact, metres.
    pub contact_radius: f64,
    /// Master seed.  The same seed always produces identical runs.
    pub seed: u64,
}

impl Default for MobilityConfig {
    fn default() -> Self {
        Self {
            grid_x:         6,
            grid_y:         6,
            cell_size:      100.0,
            communities:    10,
            nodes:          505,
            stay_range:     (0.6, 0.95),
            speed_range:    (1.0, 3.0),
            contact_radius: 30.0,
            seed:           42,
        }
    }
}

impl MobilityConfig {
    /// Total number of grid cells.
    #[inline]
    pub fn cell_count(&self) -> u32 {
        self.grid_x * self.grid_y
    }

    /// Check every precondition the engine relies on.
    pub fn validate(&self) -> CoreResult<()> {
        if self.grid_x == 0 || self.grid_y == 0 {
            return Err(CoreError::config(format!(
                "grid must have at least one cell, got {}x{}",
                self.grid_x, self.grid_y
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(CoreError::config(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.communities == 0 {
            return Err(CoreError::config("communities must be at least 1"));
        }
        if self.communities > self.cell_count() {
            return Err(CoreError::config(format!(
                "{} communities requested but the grid only has {} cells",
                self.communities,
                self.cell_count()
            )));
        }
        if self.nodes == 0 {
            return Err(CoreError::config("population must contain at least one node"));
        }
        check_range("stay_range", self.stay_range, 0.0, 1.0)?;
        check_range("speed_range", self.speed_range, f64::MIN_POSITIVE, f64::MAX)?;
        if !(self.contact_radius.is_finite() && self.contact_radius >= 0.0) {
            return Err(CoreError::config(format!(
                "contact_radius must be non-negative, got {}",
                self.contact_radius
            )));
        }
        Ok(())
    }
}

fn check_range(name: &str, (lo, hi): (f64, f64), min: f64, max: f64) -> CoreResult<()> {
    if !(lo.is_finite() && hi.is_finite()) || lo > hi || lo < min || hi > max {
        return Err(CoreError::config(format!(
            "{name} must satisfy {min} <= lo <= hi <= {max}, got ({lo}, {hi})"
        )));
    }
    Ok(())
}

// ── SocialConfig ──────────────────────────────────────────────────────────────

/// How the overlay treats two groups that share a member *and* a slot.
///
/// Distinct colours do not guarantee disjoint slot sets once colours wrap
/// past `spacing`.  `Lenient` logs the collisions and lets the group created
/// last win the shared member; `Strict` refuses to build the overlay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScheduleStrictness {
    #[default]
    Lenient,
    Strict,
}

/// Parameters of group formation and the meeting schedule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SocialConfig {
    /// Success probability of the geometric group-size draw.
    pub edge_probability: f64,
    /// Fewest other nodes drawn into a group; the seed node is added on top.
    pub min_group: u32,
    /// Most other nodes drawn into a group; the seed node is added on top.
    pub max_group: u32,
    /// Length of one meeting slot, seconds.
    pub slot_len_secs: f64,
    /// Slots per simulated day.
    pub n_slots: u32,
    /// Meetings each group holds per day.
    pub meetings_per_day: u32,
    pub strictness: ScheduleStrictness,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            edge_probability: 0.2,
            min_group:        2,
            max_group:        10,
            slot_len_secs:    3600.0,
            n_slots:          24,
            meetings_per_day: 2,
            strictness:       ScheduleStrictness::Lenient,
        }
    }
}

impl SocialConfig {
    /// Distance in slots between a group's consecutive meetings.
    #[inline]
    pub fn spacing(&self) -> u32 {
        self.n_slots / self.meetings_per_day.max(1)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.edge_probability > 0.0 && self.edge_probability <= 1.0) {
            return Err(CoreError::config(format!(
                "edge_probability must be in (0, 1], got {}",
                self.edge_probability
            )));
        }
        if self.min_group == 0 {
            return Err(CoreError::config("min_group must be at least 1"));
        }
        if self.min_group > self.max_group {
            return Err(CoreError::config(format!(
                "group size bounds inverted: min {} > max {}",
                self.min_group, self.max_group
            )));
        }
        if !(self.slot_len_secs.is_finite() && self.slot_len_secs > 0.0) {
            return Err(CoreError::config(format!(
                "slot_len_secs must be positive, got {}",
                self.slot_len_secs
            )));
        }
        if self.n_slots == 0 {
            return Err(CoreError::config("n_slots must be at least 1"));
        }
        if self.meetings_per_day == 0 || self.meetings_per_day > self.n_slots {
            return Err(CoreError::config(format!(
                "meetings_per_day must be in 1..={}, got {}",
                self.n_slots, self.meetings_per_day
            )));
        }
        Ok(())
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Parameters of the tick loop driving a model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Simulated duration, seconds.
    pub duration_secs: f64,
    /// Integration step, seconds.
    pub dt_secs: f64,
    /// Report positions every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration_secs:           24.0 * 3600.0,
            dt_secs:                 10.0,
            snapshot_interval_ticks: 360,
        }
    }
}

impl RunConfig {
    /// Number of ticks needed to cover `duration_secs` (rounded up).
    pub fn total_ticks(&self) -> u64 {
        (self.duration_secs / self.dt_secs).ceil().max(0.0) as u64
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.dt_secs.is_finite() && self.dt_secs > 0.0) {
            return Err(CoreError::config(format!(
                "dt_secs must be positive, got {}",
                self.dt_secs
            )));
        }
        if !(self.duration_secs.is_finite() && self.duration_secs >= 0.0) {
            return Err(CoreError::config(format!(
                "duration_secs must be non-negative, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }
}
