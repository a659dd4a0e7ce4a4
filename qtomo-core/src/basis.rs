//! Pauli operator basis for n-qubit tomography
//!
//! A tomography experiment measures expectation values of tensor products
//! of single-qubit Paulis, e.g. "IXYZ" = I⊗X⊗Y⊗Z on 4 qubits. The full
//! basis for n qubits has exactly 4^n such products; they are Hermitian
//! and pairwise orthogonal under the trace inner product
//! (Tr(Pᵢ Pⱼ) = d·δᵢⱼ with d = 2^n), so expectation values against all of
//! them determine a density matrix completely.
//!
//! # Scalability
//!
//! Every operator is stored as a dense d×d matrix, so a full basis costs
//! O(4^n · d²) = O(16^n) complex numbers. This is intended for small
//! registers (2–4 qubits); it is an explicit boundary of the dense
//! representation, not a defect.

use crate::error::{BasisError, Result};
use crate::pauli::{Pauli, PAULIS};
use num_complex::Complex64;
use std::fmt;

/// A tensor product of single-qubit Paulis, e.g. "XXIZ"
///
/// Qubit 0's symbol is the leftmost (slowest-varying) tensor factor, so it
/// acts on the most significant bit of a basis-state index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PauliString {
    paulis: Vec<Pauli>,
}

impl PauliString {
    /// Create a Pauli string from a vector of Paulis
    pub fn from_paulis(paulis: Vec<Pauli>) -> Self {
        Self { paulis }
    }

    /// Parse a Pauli string from its label, e.g. "IXYZ"
    pub fn from_label(label: &str) -> Result<Self> {
        let paulis: Result<Vec<_>> = label.chars().map(Pauli::from_char).collect();
        Ok(Self { paulis: paulis? })
    }

    /// The all-identity string for a given register size
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            paulis: vec![Pauli::I; num_qubits],
        }
    }

    /// Get the number of qubits
    pub fn num_qubits(&self) -> usize {
        self.paulis.len()
    }

    /// Get the Pauli operator at a specific qubit
    pub fn get(&self, qubit: usize) -> Option<Pauli> {
        self.paulis.get(qubit).copied()
    }

    /// Render the label, e.g. "IXYZ"
    pub fn label(&self) -> String {
        self.paulis.iter().map(|p| p.to_char()).collect()
    }

    /// Build the dense d×d matrix of this string, row-major
    ///
    /// Computed as the repeated Kronecker product of the 2×2 factors in
    /// label order.
    pub fn matrix(&self) -> Vec<Complex64> {
        let mut result = vec![Complex64::new(1.0, 0.0)];
        let mut dim = 1;

        for pauli in &self.paulis {
            let factor = pauli.matrix();
            let mut flat = Vec::with_capacity(4);
            for row in &factor {
                flat.extend_from_slice(row);
            }
            result = kronecker(&result, dim, &flat, 2);
            dim *= 2;
        }

        result
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for pauli in &self.paulis {
            write!(f, "{}", pauli)?;
        }
        Ok(())
    }
}

/// Kronecker product of two row-major square matrices
fn kronecker(
    a: &[Complex64],
    a_dim: usize,
    b: &[Complex64],
    b_dim: usize,
) -> Vec<Complex64> {
    let dim = a_dim * b_dim;
    let mut out = vec![Complex64::new(0.0, 0.0); dim * dim];

    for ai in 0..a_dim {
        for aj in 0..a_dim {
            let a_elem = a[ai * a_dim + aj];
            for bi in 0..b_dim {
                for bj in 0..b_dim {
                    let row = ai * b_dim + bi;
                    let col = aj * b_dim + bj;
                    out[row * dim + col] = a_elem * b[bi * b_dim + bj];
                }
            }
        }
    }

    out
}

/// One basis element: a Pauli string together with its dense matrix
#[derive(Debug, Clone)]
pub struct BasisOperator {
    /// Label of this operator
    pub string: PauliString,

    /// Dense d×d matrix, row-major
    pub matrix: Vec<Complex64>,
}

/// The complete Pauli operator basis for an n-qubit register
///
/// Holds all 4^n (label, matrix) pairs, enumerated in lexicographic order
/// over {I, X, Y, Z} with qubit 0's symbol varying slowest. Built once and
/// read-only afterwards; a basis is `Send + Sync` and can be shared across
/// trial workers behind an `Arc` without locking.
pub struct OperatorBasis {
    num_qubits: usize,
    dimension: usize,
    operators: Vec<BasisOperator>,
}

impl OperatorBasis {
    /// Build the full basis for `num_qubits` qubits
    ///
    /// # Errors
    /// Returns `BasisError::InvalidDimension` when `num_qubits < 1`.
    pub fn build(num_qubits: usize) -> Result<Self> {
        if num_qubits < 1 {
            return Err(BasisError::InvalidDimension { num_qubits });
        }

        let dimension = 1usize << num_qubits;
        let count = 4usize.pow(num_qubits as u32);
        let mut operators = Vec::with_capacity(count);

        for index in 0..count {
            let string = Self::string_at(index, num_qubits);
            let matrix = string.matrix();
            operators.push(BasisOperator { string, matrix });
        }

        Ok(Self {
            num_qubits,
            dimension,
            operators,
        })
    }

    /// Decode the Pauli string at a given enumeration index
    ///
    /// Base-4 digit decomposition with qubit 0 taking the most significant
    /// digit, so the sequence runs II…I, II…X, II…Y, II…Z, I…XI, …
    fn string_at(index: usize, num_qubits: usize) -> PauliString {
        let mut paulis = vec![Pauli::I; num_qubits];
        let mut rest = index;
        for qubit in (0..num_qubits).rev() {
            paulis[qubit] = PAULIS[rest % 4];
            rest /= 4;
        }
        PauliString::from_paulis(paulis)
    }

    /// Number of qubits the basis covers
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Hilbert-space dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of operators (4^num_qubits)
    #[inline]
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether the basis is empty (never true for a built basis)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Get the operator at an enumeration index
    pub fn get(&self, index: usize) -> Result<&BasisOperator> {
        self.operators.get(index).ok_or(BasisError::IndexOutOfRange {
            index,
            size: self.operators.len(),
        })
    }

    /// Iterate over all operators in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = &BasisOperator> {
        self.operators.iter()
    }

    /// Trace inner product Tr(Pᵢ Pⱼ) of two basis elements
    ///
    /// Equals d·δᵢⱼ for Pauli products; mainly useful for verifying
    /// orthogonality.
    pub fn trace_inner_product(&self, i: usize, j: usize) -> Result<Complex64> {
        let a = &self.get(i)?.matrix;
        let b = &self.get(j)?.matrix;
        let dim = self.dimension;

        let mut trace = Complex64::new(0.0, 0.0);
        for row in 0..dim {
            for k in 0..dim {
                trace += a[row * dim + k] * b[k * dim + row];
            }
        }

        Ok(trace)
    }
}

impl fmt::Debug for OperatorBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OperatorBasis {{ qubits: {}, operators: {} }}",
            self.num_qubits,
            self.operators.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pauli_string_from_label() {
        let string = PauliString::from_label("IXYZ").unwrap();
        assert_eq!(string.num_qubits(), 4);
        assert_eq!(string.get(0), Some(Pauli::I));
        assert_eq!(string.get(1), Some(Pauli::X));
        assert_eq!(string.get(2), Some(Pauli::Y));
        assert_eq!(string.get(3), Some(Pauli::Z));
        assert_eq!(string.label(), "IXYZ");
    }

    #[test]
    fn test_single_qubit_matrix_matches_pauli() {
        let string = PauliString::from_label("Y").unwrap();
        let m = string.matrix();
        let y = Pauli::Y.matrix();
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(m[i * 2 + j], y[i][j]);
            }
        }
    }

    #[test]
    fn test_kronecker_zz() {
        // Z⊗Z is diagonal with entries (1, -1, -1, 1)
        let string = PauliString::from_label("ZZ").unwrap();
        let m = string.matrix();
        let expected = [1.0, -1.0, -1.0, 1.0];
        for (i, &e) in expected.iter().enumerate() {
            assert!((m[i * 4 + i] - e).norm() < 1e-15);
        }
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    assert!(m[i * 4 + j].norm() < 1e-15);
                }
            }
        }
    }

    #[test]
    fn test_build_rejects_zero_qubits() {
        assert!(matches!(
            OperatorBasis::build(0),
            Err(BasisError::InvalidDimension { num_qubits: 0 })
        ));
    }

    #[test]
    fn test_basis_size() {
        for n in 1..=3 {
            let basis = OperatorBasis::build(n).unwrap();
            assert_eq!(basis.len(), 4usize.pow(n as u32));
            assert_eq!(basis.dimension(), 1 << n);
        }
    }

    #[test]
    fn test_enumeration_order() {
        // Qubit 0 varies slowest: II, IX, IY, IZ, XI, ...
        let basis = OperatorBasis::build(2).unwrap();
        assert_eq!(basis.get(0).unwrap().string.label(), "II");
        assert_eq!(basis.get(1).unwrap().string.label(), "IX");
        assert_eq!(basis.get(3).unwrap().string.label(), "IZ");
        assert_eq!(basis.get(4).unwrap().string.label(), "XI");
        assert_eq!(basis.get(15).unwrap().string.label(), "ZZ");
    }

    #[test]
    fn test_operators_are_hermitian() {
        let basis = OperatorBasis::build(2).unwrap();
        let dim = basis.dimension();
        for op in basis.iter() {
            for i in 0..dim {
                for j in 0..dim {
                    let diff = (op.matrix[i * dim + j] - op.matrix[j * dim + i].conj()).norm();
                    assert!(diff < 1e-15, "{} is not Hermitian", op.string);
                }
            }
        }
    }

    #[test]
    fn test_trace_orthogonality() {
        let basis = OperatorBasis::build(2).unwrap();
        let d = basis.dimension() as f64;
        for i in 0..basis.len() {
            for j in 0..basis.len() {
                let ip = basis.trace_inner_product(i, j).unwrap();
                let expected = if i == j { d } else { 0.0 };
                assert!(
                    (ip - expected).norm() < 1e-12,
                    "Tr(P{} P{}) = {} expected {}",
                    i,
                    j,
                    ip,
                    expected
                );
            }
        }
    }
}
