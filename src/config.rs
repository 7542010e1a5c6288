//! Run configuration loaded from YAML.
//!
//! Every field is optional and falls back to the defaults below:
//!
//! ```yaml
//! num_particles: 300
//! num_types: 5
//! width: 1200.0
//! height: 800.0
//! seed: 42           # omit for a random seed
//! steps: 600
//! report_every: 60
//! reset_every: ~     # re-randomize particles every N ticks
//! physics:
//!   dt: 0.02
//!   friction: 0.95
//!   radius: 70.0
//!   force_scale: 15.0
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SimulationError};
use crate::params::StepParams;
use crate::simulation::check_bounds;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_particles: usize,
    pub num_types: usize,
    pub width: f32,
    pub height: f32,
    pub seed: Option<u64>,
    pub steps: usize,
    pub report_every: usize,
    pub reset_every: Option<usize>,
    pub physics: StepParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_particles: 300,
            num_types: 5,
            width: 1200.0,
            height: 800.0,
            seed: None,
            steps: 600,
            report_every: 60,
            reset_every: None,
            physics: StepParams::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_types == 0 {
            return Err(SimulationError::NoTypes);
        }
        check_bounds(self.width, self.height)?;

        let physics = &self.physics;
        if physics.radius.is_nan() || physics.radius < 0.0 {
            return Err(SimulationError::InvalidRadius(physics.radius));
        }
        if !(physics.dt.is_finite() && physics.dt > 0.0) {
            return Err(SimulationError::InvalidConfig("dt must be positive and finite"));
        }
        if !physics.force_scale.is_finite() {
            return Err(SimulationError::InvalidConfig("force_scale must be finite"));
        }
        if !(0.0..=1.0).contains(&physics.friction) {
            return Err(SimulationError::InvalidConfig("friction must be in [0, 1]"));
        }
        if self.report_every == 0 {
            return Err(SimulationError::InvalidConfig("report_every must be at least 1"));
        }
        if self.reset_every == Some(0) {
            return Err(SimulationError::InvalidConfig("reset_every must be at least 1"));
        }
        Ok(())
    }
}
