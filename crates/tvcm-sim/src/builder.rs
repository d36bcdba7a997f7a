//! Fluent builder for constructing a [`Sim`].

use tvcm_core::{MobilityConfig, RunConfig, SimRng, SocialConfig};
use tvcm_mobility::MobilityEngine;
use tvcm_social::SocialOverlay;

use crate::{Sim, SimResult};

/// Stream offset of the engine's generator under the run seed.
const ENGINE_STREAM: u64 = 0;
/// Stream offset of the group-formation generator under the run seed.
const SOCIAL_STREAM: u64 = 1;

/// Fluent builder for [`Sim`] over the plain engine or the social overlay.
///
/// # Required inputs
///
/// - [`MobilityConfig`]: grid, population, speeds, contact radius, seed
/// - [`RunConfig`]: duration, step length, snapshot cadence
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                  |
/// |---------------|--------------------------|
/// | `.social(c)`  | `SocialConfig::default()`|
///
/// # Randomness
///
/// Both models draw from children of `SimRng::new(mobility.seed)`, so the
/// engine of a plain run and of a social run with the same seed start from
/// the same layout.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(mobility, run).build_plain()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    mobility: MobilityConfig,
    run:      RunConfig,
    social:   Option<SocialConfig>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(mobility: MobilityConfig, run: RunConfig) -> Self {
        Self { mobility, run, social: None }
    }

    /// Supply the social overlay parameters used by
    /// [`build_social`](Self::build_social).
    pub fn social(mut self, social: SocialConfig) -> Self {
        self.social = Some(social);
        self
    }

    /// Build a run over the bare waypoint walk.
    pub fn build_plain(self) -> SimResult<Sim<MobilityEngine>> {
        self.run.validate()?;
        let mut root = SimRng::new(self.mobility.seed);
        let engine = MobilityEngine::with_rng(self.mobility, root.child(ENGINE_STREAM))?;
        Sim::new(self.run, engine)
    }

    /// Build a run over the walk wrapped in the meeting overlay.
    pub fn build_social(self) -> SimResult<Sim<SocialOverlay<MobilityEngine>>> {
        self.run.validate()?;
        let mut root = SimRng::new(self.mobility.seed);
        let engine = MobilityEngine::with_rng(self.mobility, root.child(ENGINE_STREAM))?;
        let mut social_rng = root.child(SOCIAL_STREAM);
        let overlay = SocialOverlay::new(engine, self.social.unwrap_or_default(), &mut social_rng)?;
        Sim::new(self.run, overlay)
    }
}
