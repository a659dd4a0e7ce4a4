//! Error types for operator-basis construction

use thiserror::Error;

/// Errors that can occur while building Pauli operator bases
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BasisError {
    /// Qubit count below the minimum of one
    #[error("Invalid qubit count {num_qubits}, expected at least 1")]
    InvalidDimension { num_qubits: usize },

    /// Unrecognized Pauli symbol in a label
    #[error("Invalid Pauli symbol '{symbol}', expected one of I, X, Y, Z")]
    InvalidSymbol { symbol: char },

    /// Operator index outside the basis
    #[error("Operator index {index} out of range for basis of {size} operators")]
    IndexOutOfRange { index: usize, size: usize },
}

impl BasisError {
    /// Create an invalid-dimension error
    pub fn invalid_dimension(num_qubits: usize) -> Self {
        Self::InvalidDimension { num_qubits }
    }
}

/// Result type for operator-basis operations
pub type Result<T> = std::result::Result<T, BasisError>;
