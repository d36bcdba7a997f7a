//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! Every random draw in a run flows through an explicit [`SimRng`] handle.
//! The mobility engine owns one (waypoint choice, initial placement, speeds);
//! the social overlay is handed a `&mut SimRng` at construction for group
//! sampling.  The builders derive the overlay's generator from the engine's
//! seed with [`SimRng::child`], so one `u64` seed reproduces a whole run.
//!
//! There is no hidden global generator anywhere in the workspace.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{CoreError, CoreResult, Rect, Vec2};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Single-threaded by construction; if parallel randomness is ever needed,
/// give each worker its own `SimRng` derived with [`child`](Self::child).
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform draw from the closed interval `[lo, hi]`.  `lo == hi` is
    /// allowed and returns `lo`.
    #[inline]
    pub fn uniform_inclusive(&mut self, (lo, hi): (f64, f64)) -> f64 {
        self.0.gen_range(lo..=hi)
    }

    /// Uniform point inside `rect`.
    #[inline]
    pub fn point_in(&mut self, rect: &Rect) -> Vec2 {
        Vec2::new(
            self.0.gen_range(rect.min.x..rect.max.x),
            self.0.gen_range(rect.min.y..rect.max.y),
        )
    }

    /// `amount` distinct indices drawn uniformly from `0..length`, in random
    /// order.
    ///
    /// # Panics
    /// Panics if `amount > length`.
    #[inline]
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, length, amount).into_vec()
    }

    /// Number of Bernoulli(`p`) trials up to and including the first success
    /// (support `1, 2, 3, …`), truncated at `cap`.
    ///
    /// At most `cap` trials are run, so a vanishing `p` returns `cap` instead
    /// of spinning.
    pub fn geometric_trials(&mut self, p: f64, cap: u64) -> CoreResult<u64> {
        if !(p > 0.0 && p <= 1.0) {
            return Err(CoreError::config(format!("geometric p must be in (0, 1], got {p}")));
        }
        let cap = cap.max(1);
        let mut trials = 1;
        while trials < cap && !self.gen_bool(p) {
            trials += 1;
        }
        Ok(trials)
    }
}
