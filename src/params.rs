//! Per-tick tuning parameters.

use serde::Deserialize;

/// Parameters passed to every `step`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StepParams {
    /// Time step.
    pub dt: f32,
    /// Velocity multiplier applied each tick before the force term. 1.0 = no damping.
    pub friction: f32,
    /// Cutoff radius; only neighbours strictly closer than this interact.
    pub radius: f32,
    /// Multiplier on every matrix coefficient.
    pub force_scale: f32,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            dt: 0.02,
            friction: 0.95,
            radius: 70.0,
            force_scale: 15.0,
        }
    }
}
