//! Error types for state preparation and density-matrix operations

use thiserror::Error;

/// Errors that can occur during state operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Qubit count below the minimum of one
    #[error("Invalid qubit count {num_qubits}, expected at least 1")]
    InvalidDimension { num_qubits: usize },

    /// Unrecognized state-family label
    #[error("Invalid state variant '{label}', expected one of ghz, w, random")]
    InvalidVariant { label: String },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// State not normalized
    #[error("State vector not normalized, norm = {norm}")]
    NotNormalized { norm: f64 },
}

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;
