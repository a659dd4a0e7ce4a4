//! Core operator types for the qtomo tomography toolkit
//!
//! This crate provides the fundamental operator primitives:
//! - [`Pauli`]: the four single-qubit Pauli operators
//! - [`PauliString`]: tensor products of Paulis with dense matrices
//! - [`OperatorBasis`]: the complete 4^n measurement basis for n qubits
//!
//! # Example
//! ```
//! use qtomo_core::OperatorBasis;
//!
//! let basis = OperatorBasis::build(2).unwrap();
//! assert_eq!(basis.len(), 16);
//! assert_eq!(basis.get(1).unwrap().string.label(), "IX");
//! ```

pub mod basis;
pub mod error;
pub mod pauli;

// Re-exports for convenience
pub use basis::{BasisOperator, OperatorBasis, PauliString};
pub use error::{BasisError, Result};
pub use num_complex::Complex64;
pub use pauli::{Pauli, PAULIS};
