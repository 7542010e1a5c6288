//! # Particle Life
//!
//! A 2D "particle life" simulation: particles of several types push and pull
//! on each other according to a random, asymmetric interaction matrix, and
//! clusters, chains and orbiters emerge from those local rules.
//!
//! The core is [`ParticleSystem`], stepped once per frame with the current
//! [`StepParams`]. Rendering and input are left to the caller.

pub mod config;
pub mod error;
pub mod forces;
pub mod matrix;
pub mod params;
pub mod simulation;

pub use config::SimulationConfig;
pub use error::{Result, SimulationError};
pub use forces::pair_force;
pub use matrix::InteractionMatrix;
pub use params::StepParams;
pub use simulation::ParticleSystem;
