//! Simulation time model.
//!
//! # Design
//!
//! The kinematic integrator works in continuous seconds (`dt: f64`), while
//! the run loop counts discrete steps with an integer [`Tick`].  Meetings are
//! organised into a recurring day of `n_slots` fixed-length slots:
//!
//!   slot(t) = floor(t / slot_len) mod n_slots
//!
//! [`SlotClock`] owns the accumulated time and reports, on every advance,
//! which slot the step started in and which it ended in.  A step "crosses a
//! boundary" when the two differ.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute step counter for the run loop.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SlotClock ────────────────────────────────────────────────────────────────

/// Slot indices observed across one [`SlotClock::advance`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotTransition {
    /// Slot the step started in.
    pub previous: u32,
    /// Slot the step ended in.
    pub current: u32,
}

impl SlotTransition {
    /// `true` when the step entered a different slot.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.previous != self.current
    }
}

/// Accumulating clock that maps elapsed seconds onto a recurring slot day.
#[derive(Clone, Debug)]
pub struct SlotClock {
    slot_len_secs: f64,
    n_slots:       u32,
    elapsed_secs:  f64,
}

impl SlotClock {
    /// Create a clock at `t = 0`.  Callers validate `slot_len_secs > 0` and
    /// `n_slots > 0` (see [`SocialConfig::validate`][crate::SocialConfig::validate]).
    pub fn new(slot_len_secs: f64, n_slots: u32) -> Self {
        Self { slot_len_secs, n_slots, elapsed_secs: 0.0 }
    }

    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    #[inline]
    pub fn n_slots(&self) -> u32 {
        self.n_slots
    }

    /// Slot index for an arbitrary time `t` (seconds).
    #[inline]
    pub fn slot_at(&self, t: f64) -> u32 {
        let whole = (t / self.slot_len_secs).floor().max(0.0) as u64;
        (whole % self.n_slots as u64) as u32
    }

    /// Slot index at the clock's current time.
    #[inline]
    pub fn current_slot(&self) -> u32 {
        self.slot_at(self.elapsed_secs)
    }

    /// Advance by `dt` seconds and report the slots before and after.
    pub fn advance(&mut self, dt: f64) -> SlotTransition {
        let previous = self.current_slot();
        self.elapsed_secs += dt;
        SlotTransition { previous, current: self.current_slot() }
    }

    /// Break elapsed time into (day, slot).
    pub fn day_and_slot(&self) -> (u64, u32) {
        let whole = (self.elapsed_secs / self.slot_len_secs).floor().max(0.0) as u64;
        (whole / self.n_slots as u64, (whole % self.n_slots as u64) as u32)
    }
}

impl fmt::Display for SlotClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (day, slot) = self.day_and_slot();
        write!(f, "t={:.1}s (day {} slot {:02})", self.elapsed_secs, day, slot)
    }
}
