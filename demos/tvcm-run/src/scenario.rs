//! TOML scenario file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use tvcm_core::{MobilityConfig, RunConfig, SocialConfig};

/// Everything one invocation runs.  Every section is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub mobility:       MobilityConfig,
    pub social:         SocialConfig,
    pub run:            RunConfig,
    /// Also run the meeting overlay after the plain walk.
    pub social_enabled: bool,
    pub output_dir:     PathBuf,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            mobility:       MobilityConfig::default(),
            social:         SocialConfig::default(),
            run:            RunConfig::default(),
            social_enabled: true,
            output_dir:     PathBuf::from("output/tvcm-run"),
        }
    }
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        let scenario: Scenario = toml::from_str(&content)
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        Ok(scenario)
    }

    /// Check every section before any output directory is created.
    pub fn validate(&self) -> Result<()> {
        self.mobility.validate().context("[mobility]")?;
        self.social.validate().context("[social]")?;
        self.run.validate().context("[run]")?;
        Ok(())
    }
}
