//! Pure quantum state representation
//!
//! A pure n-qubit state is a unit-norm complex vector of length 2^n. This
//! is the ground-truth side of a tomography trial: the state is prepared
//! once, measured against the operator basis, and discarded after scoring.
//!
//! Qubit 0 occupies the most significant bit of a basis-state index,
//! matching the tensor-factor order of `qtomo_core::PauliString`.

use crate::error::{Result, StateError};
use num_complex::Complex64;
use std::fmt;

/// Pure quantum state as a dense amplitude vector
pub struct PureState {
    /// Number of qubits
    num_qubits: usize,

    /// State dimension (2^num_qubits)
    dimension: usize,

    /// Complex amplitudes, length 2^num_qubits
    amplitudes: Vec<Complex64>,
}

impl PureState {
    /// Create a new state initialized to |0…0⟩
    ///
    /// # Errors
    /// Returns `StateError::InvalidDimension` when `num_qubits < 1`.
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits < 1 {
            return Err(StateError::InvalidDimension { num_qubits });
        }

        let dimension = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dimension];
        amplitudes[0] = Complex64::new(1.0, 0.0);

        Ok(Self {
            num_qubits,
            dimension,
            amplitudes,
        })
    }

    /// Create a state from raw amplitude data
    ///
    /// # Errors
    /// Returns `StateError::DimensionMismatch` if the amplitude count is
    /// not 2^num_qubits.
    pub fn from_amplitudes(num_qubits: usize, amplitudes: &[Complex64]) -> Result<Self> {
        if num_qubits < 1 {
            return Err(StateError::InvalidDimension { num_qubits });
        }

        let dimension = 1usize << num_qubits;
        if amplitudes.len() != dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: amplitudes.len(),
            });
        }

        Ok(Self {
            num_qubits,
            dimension,
            amplitudes: amplitudes.to_vec(),
        })
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get a reference to the amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Get a mutable reference to the amplitudes
    #[inline]
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Compute the L2 norm of the state vector
    pub fn norm(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
    }

    /// Normalize the state vector in place
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 1e-12 {
            let inv_norm = 1.0 / norm;
            for amplitude in &mut self.amplitudes {
                *amplitude *= inv_norm;
            }
        }
    }

    /// Check if the state is normalized (norm ≈ 1)
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Inner product ⟨self|other⟩
    ///
    /// # Errors
    /// Returns `StateError::DimensionMismatch` for states of different size.
    pub fn inner_product(&self, other: &PureState) -> Result<Complex64> {
        if self.dimension != other.dimension {
            return Err(StateError::DimensionMismatch {
                expected: self.dimension,
                actual: other.dimension,
            });
        }

        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }
}

impl fmt::Debug for PureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PureState {{ qubits: {}, dim: {}, norm: {:.6} }}",
            self.num_qubits,
            self.dimension,
            self.norm()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_state() {
        let state = PureState::new(2).unwrap();
        assert_eq!(state.num_qubits(), 2);
        assert_eq!(state.dimension(), 4);
        assert_eq!(state.amplitudes()[0], Complex64::new(1.0, 0.0));
        assert!(state.is_normalized(1e-10));
    }

    #[test]
    fn test_new_rejects_zero_qubits() {
        assert!(matches!(
            PureState::new(0),
            Err(StateError::InvalidDimension { num_qubits: 0 })
        ));
    }

    #[test]
    fn test_from_amplitudes_dimension_mismatch() {
        let amplitudes = vec![Complex64::new(1.0, 0.0)];
        assert!(PureState::from_amplitudes(2, &amplitudes).is_err());
    }

    #[test]
    fn test_normalize() {
        let amplitudes = vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.0),
        ];
        let mut state = PureState::from_amplitudes(2, &amplitudes).unwrap();
        state.normalize();

        assert_relative_eq!(state.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(state.amplitudes()[0].norm(), 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_inner_product_self() {
        let state = PureState::new(2).unwrap();
        let ip = state.inner_product(&state).unwrap();
        assert_relative_eq!(ip.re, 1.0, epsilon = 1e-10);
        assert_relative_eq!(ip.im, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_inner_product_orthogonal() {
        let a = PureState::new(1).unwrap();
        let b = PureState::from_amplitudes(
            1,
            &[Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        )
        .unwrap();
        let ip = a.inner_product(&b).unwrap();
        assert!(ip.norm() < 1e-12);
    }
}
