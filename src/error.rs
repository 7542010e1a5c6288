//! Error types for simulation setup and stepping.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("number of particle types must be at least 1")]
    NoTypes,
    #[error("simulation bounds must be positive and finite (got {width} x {height})")]
    InvalidBounds { width: f32, height: f32 },
    #[error("interaction radius must be non-negative (got {0})")]
    InvalidRadius(f32),
    #[error("interaction matrix must be square")]
    MatrixNotSquare,
    #[error("interaction matrix has {actual} types, expected {expected}")]
    MatrixSizeMismatch { expected: usize, actual: usize },
    #[error("positions, velocities and types must all have the same length")]
    StateLengthMismatch,
    #[error("particle {index} has type {type_id}, but only {num_types} types exist")]
    TypeOutOfRange {
        index: usize,
        type_id: usize,
        num_types: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
