//! Error types for the simulation layer

use std::fmt;

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur during a tomography trial
#[derive(Debug, Clone)]
pub enum SimError {
    /// Invalid configuration
    InvalidConfig(String),

    /// Optimizer did not converge within its iteration budget
    ReconstructionFailed {
        iterations: usize,
        final_cost: f64,
        reason: String,
    },

    /// Measurement simulation failed
    MeasurementFailed(String),

    /// Error from state preparation or density-matrix operations
    StateError {
        message: String,
    },

    /// Error from operator-basis construction
    BasisError {
        message: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfig(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            SimError::ReconstructionFailed {
                iterations,
                final_cost,
                reason,
            } => {
                write!(
                    f,
                    "Reconstruction failed after {} iterations (cost {:.3e}): {}",
                    iterations, final_cost, reason
                )
            }
            SimError::MeasurementFailed(msg) => {
                write!(f, "Measurement simulation failed: {}", msg)
            }
            SimError::StateError { message } => {
                write!(f, "State error: {}", message)
            }
            SimError::BasisError { message } => {
                write!(f, "Basis error: {}", message)
            }
        }
    }
}

impl std::error::Error for SimError {}

impl From<qtomo_state::StateError> for SimError {
    fn from(err: qtomo_state::StateError) -> Self {
        SimError::StateError {
            message: err.to_string(),
        }
    }
}

impl From<qtomo_core::BasisError> for SimError {
    fn from(err: qtomo_core::BasisError) -> Self {
        SimError::BasisError {
            message: err.to_string(),
        }
    }
}
