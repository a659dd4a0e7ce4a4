//! Density matrix representation
//!
//! A density matrix ρ is a positive semi-definite, Hermitian matrix with
//! Tr(ρ) = 1. For pure states ρ = |ψ⟩⟨ψ| and the purity Tr(ρ²) equals 1.
//!
//! Reconstruction estimates produced by the unconstrained least-squares
//! fit also live in this type but are **not** guaranteed Hermitian,
//! trace-1, or positive: `is_valid` reports whether a matrix passes those
//! checks, and metric code treats them as soft targets.

use crate::error::{Result, StateError};
use crate::pure_state::PureState;
use num_complex::Complex64;
use std::fmt;

/// Density matrix stored row-major as a flat complex vector
///
/// Memory usage is O(4^n) complex numbers for n qubits.
#[derive(Clone, PartialEq)]
pub struct DensityMatrix {
    /// Number of qubits
    num_qubits: usize,

    /// Dimension (2^num_qubits)
    dimension: usize,

    /// Matrix elements in row-major order, length dimension²
    matrix: Vec<Complex64>,
}

impl DensityMatrix {
    /// Create ρ = |ψ⟩⟨ψ| from a pure state
    pub fn from_pure_state(state: &PureState) -> Self {
        let dimension = state.dimension();
        let amplitudes = state.amplitudes();
        let mut matrix = vec![Complex64::new(0.0, 0.0); dimension * dimension];

        // Outer product: ρᵢⱼ = ψᵢ ψⱼ*
        for i in 0..dimension {
            for j in 0..dimension {
                matrix[i * dimension + j] = amplitudes[i] * amplitudes[j].conj();
            }
        }

        Self {
            num_qubits: state.num_qubits(),
            dimension,
            matrix,
        }
    }

    /// Create the maximally mixed state ρ = I/2^n
    ///
    /// # Errors
    /// Returns `StateError::InvalidDimension` when `num_qubits < 1`.
    pub fn maximally_mixed(num_qubits: usize) -> Result<Self> {
        if num_qubits < 1 {
            return Err(StateError::InvalidDimension { num_qubits });
        }

        let dimension = 1usize << num_qubits;
        let mut matrix = vec![Complex64::new(0.0, 0.0); dimension * dimension];

        let value = Complex64::new(1.0 / dimension as f64, 0.0);
        for i in 0..dimension {
            matrix[i * dimension + i] = value;
        }

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    /// Create a density matrix from raw row-major elements
    ///
    /// No physicality checks are performed; this is the entry point for
    /// reconstruction estimates, which may be unphysical by design.
    pub fn from_elements(num_qubits: usize, elements: Vec<Complex64>) -> Result<Self> {
        if num_qubits < 1 {
            return Err(StateError::InvalidDimension { num_qubits });
        }

        let dimension = 1usize << num_qubits;
        if elements.len() != dimension * dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension * dimension,
                actual: elements.len(),
            });
        }

        Ok(Self {
            num_qubits,
            dimension,
            matrix: elements,
        })
    }

    /// Get number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get matrix dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get a matrix element ρᵢⱼ
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dimension + col]
    }

    /// Set a matrix element ρᵢⱼ
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.matrix[row * self.dimension + col] = value;
    }

    /// Get reference to the full matrix data
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    /// Calculate trace: Tr(ρ)
    ///
    /// Equals 1 for valid density matrices.
    pub fn trace(&self) -> Complex64 {
        let mut tr = Complex64::new(0.0, 0.0);
        for i in 0..self.dimension {
            tr += self.get(i, i);
        }
        tr
    }

    /// Calculate the purity: Tr(ρ²)
    ///
    /// Equals 1 for pure states, less for mixed states. For unphysical
    /// reconstruction estimates the value may leave [0, 1]; that is
    /// diagnostic information, not an error.
    pub fn purity(&self) -> f64 {
        let dim = self.dimension;
        let mut trace = Complex64::new(0.0, 0.0);

        // Tr(ρ²) = Σᵢⱼ ρᵢⱼ ρⱼᵢ
        for i in 0..dim {
            for j in 0..dim {
                trace += self.get(i, j) * self.get(j, i);
            }
        }

        trace.re
    }

    /// Expectation value Tr(Oρ) of a row-major d×d operator
    ///
    /// For Hermitian O against a Hermitian ρ the result is real up to
    /// rounding; callers take the real part.
    ///
    /// # Errors
    /// Returns `StateError::DimensionMismatch` if the operator size does
    /// not match.
    pub fn expectation(&self, operator: &[Complex64]) -> Result<Complex64> {
        let dim = self.dimension;
        if operator.len() != dim * dim {
            return Err(StateError::DimensionMismatch {
                expected: dim * dim,
                actual: operator.len(),
            });
        }

        // Tr(Oρ) = Σᵢₖ Oᵢₖ ρₖᵢ
        let mut trace = Complex64::new(0.0, 0.0);
        for i in 0..dim {
            for k in 0..dim {
                trace += operator[i * dim + k] * self.get(k, i);
            }
        }

        Ok(trace)
    }

    /// Check Hermiticity: ρᵢⱼ = ρⱼᵢ* within tolerance
    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        for i in 0..self.dimension {
            for j in i..self.dimension {
                let diff = (self.get(i, j) - self.get(j, i).conj()).norm();
                if diff > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /// Check whether this is plausibly a valid density matrix
    ///
    /// Verifies trace ≈ 1, Hermiticity, and non-negative diagonal. The
    /// diagonal check is a cheap necessary condition for positive
    /// semi-definiteness, not a full eigenvalue test.
    pub fn is_valid(&self, tolerance: f64) -> bool {
        if (self.trace() - Complex64::new(1.0, 0.0)).norm() > tolerance {
            return false;
        }

        if !self.is_hermitian(tolerance) {
            return false;
        }

        for i in 0..self.dimension {
            if self.get(i, i).re < -tolerance {
                return false;
            }
        }

        true
    }
}

impl fmt::Debug for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DensityMatrix {{ qubits: {}, dim: {}, purity: {:.4} }}",
            self.num_qubits,
            self.dimension,
            self.purity()
        )
    }
}
