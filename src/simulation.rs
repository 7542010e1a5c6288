use glam::Vec2;
use rand::Rng;
use rayon::prelude::*;

use crate::error::{Result, SimulationError};
use crate::forces::pair_force;
use crate::matrix::InteractionMatrix;
use crate::params::StepParams;

/// All particle state plus the interaction matrix that drives it.
///
/// Particles are stored as parallel arrays indexed by particle. The three
/// arrays always have the same length; only `reset`/`randomize` and `step`
/// mutate them, and only in place.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    width: f32,
    height: f32,
    matrix: InteractionMatrix,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    types: Vec<usize>,
}

impl ParticleSystem {
    /// Creates a system with a freshly generated matrix and randomized particles.
    pub fn new<R: Rng + ?Sized>(
        num_particles: usize,
        num_types: usize,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Result<Self> {
        check_bounds(width, height)?;
        let matrix = InteractionMatrix::generate(num_types, rng)?;

        let mut system = Self {
            width,
            height,
            matrix,
            positions: vec![Vec2::ZERO; num_particles],
            velocities: vec![Vec2::ZERO; num_particles],
            types: vec![0; num_particles],
        };
        system.reset(rng);
        Ok(system)
    }

    /// Creates a system from an exact initial state.
    pub fn from_state(
        matrix: InteractionMatrix,
        positions: Vec<Vec2>,
        velocities: Vec<Vec2>,
        types: Vec<usize>,
        width: f32,
        height: f32,
    ) -> Result<Self> {
        check_bounds(width, height)?;
        if positions.len() != velocities.len() || positions.len() != types.len() {
            return Err(SimulationError::StateLengthMismatch);
        }
        let num_types = matrix.num_types();
        if let Some((index, &type_id)) = types.iter().enumerate().find(|(_, t)| **t >= num_types) {
            return Err(SimulationError::TypeOutOfRange {
                index,
                type_id,
                num_types,
            });
        }

        Ok(Self {
            width,
            height,
            matrix,
            positions,
            velocities,
            types,
        })
    }

    /// Re-randomizes position, velocity and type of every particle. The matrix is kept.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let num_types = self.matrix.num_types();
        for ((position, velocity), type_id) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.types.iter_mut())
        {
            *position = Vec2::new(rng.gen_range(0.0..self.width), rng.gen_range(0.0..self.height));
            *velocity = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            *type_id = rng.gen_range(0..num_types);
        }
        log::debug!("Reset {} particles", self.positions.len());
    }

    /// Generates a new matrix with the same number of types, then resets the particles.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.matrix = InteractionMatrix::generate(self.matrix.num_types(), rng)?;
        self.reset(rng);
        log::debug!("Randomized matrix and particles");
        Ok(())
    }

    /// Replaces the matrix. The number of types must not change, since existing
    /// particle types index into it.
    pub fn set_matrix(&mut self, matrix: InteractionMatrix) -> Result<()> {
        if matrix.num_types() != self.matrix.num_types() {
            return Err(SimulationError::MatrixSizeMismatch {
                expected: self.matrix.num_types(),
                actual: matrix.num_types(),
            });
        }
        self.matrix = matrix;
        Ok(())
    }

    /// Advances the simulation by one tick: forces, integration, then wrap.
    pub fn step(&mut self, dt: f32, friction: f32, radius: f32, force_scale: f32) -> Result<()> {
        if radius.is_nan() || radius < 0.0 {
            return Err(SimulationError::InvalidRadius(radius));
        }

        let forces = self.compute_forces(radius, force_scale);
        self.integrate(&forces, friction, dt);
        self.wrap_positions();

        log::trace!("Stepped {} particles (dt = {dt}, radius = {radius})", self.len());
        Ok(())
    }

    /// Same as [`ParticleSystem::step`], taking the parameters as one struct.
    pub fn step_with(&mut self, params: &StepParams) -> Result<()> {
        self.step(params.dt, params.friction, params.radius, params.force_scale)
    }

    /// Net force on every particle from all neighbours within `radius`.
    ///
    /// Each particle's sum runs over its neighbours in index order, so the
    /// result does not depend on how rayon splits the outer loop.
    pub fn compute_forces(&self, radius: f32, force_scale: f32) -> Vec<Vec2> {
        (0..self.len())
            .into_par_iter()
            .map(|a| self.force_on(a, radius, force_scale))
            .collect()
    }

    fn force_on(&self, a: usize, radius: f32, force_scale: f32) -> Vec2 {
        let position = self.positions[a];
        let row = self.matrix.row(self.types[a]);

        self.positions
            .iter()
            .zip(&self.types)
            .enumerate()
            .filter(|(b, _)| *b != a)
            .fold(Vec2::ZERO, |total, (_, (other, &other_type))| {
                total + pair_force(position - *other, radius, row[other_type], force_scale)
            })
    }

    // Semi-implicit Euler: damp, add force, then move with the new velocity.
    fn integrate(&mut self, forces: &[Vec2], friction: f32, dt: f32) {
        self.velocities
            .par_iter_mut()
            .zip(self.positions.par_iter_mut())
            .zip(forces.par_iter())
            .for_each(|((velocity, position), force)| {
                *velocity = *velocity * friction + *force * dt;
                *position += *velocity * dt;
            });
    }

    fn wrap_positions(&mut self) {
        let (width, height) = (self.width, self.height);
        self.positions.par_iter_mut().for_each(|position| {
            position.x = wrap(position.x, width);
            position.y = wrap(position.y, height);
        });
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    pub fn types(&self) -> &[usize] {
        &self.types
    }

    pub fn matrix(&self) -> &InteractionMatrix {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn num_types(&self) -> usize {
        self.matrix.num_types()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Mean velocity magnitude, 0 for an empty system.
    pub fn mean_speed(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.velocities.iter().map(|v| v.length()).sum::<f32>() / self.len() as f32
    }

    /// Number of particles of each type, indexed by type.
    pub fn type_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_types()];
        for &type_id in &self.types {
            counts[type_id] += 1;
        }
        counts
    }
}

pub(crate) fn check_bounds(width: f32, height: f32) -> Result<()> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(SimulationError::InvalidBounds { width, height })
    }
}

/// Euclidean modulo into `[0, size)`.
#[inline]
fn wrap(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    // tiny negative inputs can round up to exactly `size`
    if wrapped >= size { 0.0 } else { wrapped }
}
