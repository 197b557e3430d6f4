use thiserror::Error;

/// Reasons a spectrum table is rejected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidTableError {
    #[error("energy and weight tables differ in length ({energy} vs {weight})")]
    LengthMismatch { energy: usize, weight: usize },
    #[error("spectrum table needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("energies must be strictly increasing (E[{index}] = {value} does not exceed the previous point)")]
    NonIncreasingEnergy { index: usize, value: f64 },
    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },
    #[error("negative weight {value} at index {index}")]
    NegativeWeight { index: usize, value: f64 },
    #[error("spectrum has zero total weight")]
    ZeroTotalWeight,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidTable(#[from] InvalidTableError),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("invalid source: {0}")]
    InvalidSource(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, Error>;
