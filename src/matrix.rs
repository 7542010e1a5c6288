use std::fmt;

use rand::Rng;

use crate::error::{Result, SimulationError};

/// Per type-pair force coefficients.
///
/// `get(i, j)` is the coefficient applied to a type-`i` particle by a nearby
/// type-`j` particle. Positive values repel, negative values attract. The
/// table is not symmetric unless [`InteractionMatrix::symmetrized`] is used.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    num_types: usize,
    // row-major, num_types * num_types
    coefficients: Vec<f32>,
}

impl InteractionMatrix {
    /// Draws every entry independently and uniformly from `[-1, 1)`.
    pub fn generate<R: Rng + ?Sized>(num_types: usize, rng: &mut R) -> Result<Self> {
        if num_types == 0 {
            return Err(SimulationError::NoTypes);
        }

        let coefficients = (0..num_types * num_types)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();
        let matrix = Self {
            num_types,
            coefficients,
        };

        log::info!("Interaction matrix:\n{matrix}");
        Ok(matrix)
    }

    /// Builds a matrix from a flat row-major table.
    pub fn new(num_types: usize, coefficients: Vec<f32>) -> Result<Self> {
        if num_types == 0 {
            return Err(SimulationError::NoTypes);
        }
        if coefficients.len() != num_types * num_types {
            return Err(SimulationError::MatrixNotSquare);
        }
        Ok(Self {
            num_types,
            coefficients,
        })
    }

    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let num_types = rows.len();
        if rows.iter().any(|row| row.len() != num_types) {
            return Err(SimulationError::MatrixNotSquare);
        }
        Self::new(num_types, rows.concat())
    }

    /// A matrix of the given size with every coefficient set to zero.
    pub fn zeros(num_types: usize) -> Result<Self> {
        Self::new(num_types, vec![0.0; num_types * num_types])
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.coefficients[i * self.num_types + j]
    }

    pub fn num_types(&self) -> usize {
        self.num_types
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.coefficients[i * self.num_types..(i + 1) * self.num_types]
    }

    /// Returns `(M + Mᵀ) / 2`. Never applied implicitly.
    pub fn symmetrized(&self) -> Self {
        let n = self.num_types;
        let coefficients = (0..n * n)
            .map(|k| {
                let (i, j) = (k / n, k % n);
                (self.get(i, j) + self.get(j, i)) * 0.5
            })
            .collect();
        Self {
            num_types: n,
            coefficients,
        }
    }

    /// Returns a copy with the diagonal (same-type coefficients) multiplied by `factor`.
    pub fn with_self_interaction_scaled(&self, factor: f32) -> Self {
        let mut scaled = self.clone();
        for i in 0..self.num_types {
            scaled.coefficients[i * self.num_types + i] *= factor;
        }
        scaled
    }
}

impl fmt::Display for InteractionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_types {
            let row: Vec<String> = self.row(i).iter().map(|c| format!("{c:+.3}")).collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        Ok(())
    }
}
