//! Comparison metrics between ground truth and reconstruction
//!
//! All metrics are pure functions of their inputs. They are only reachable
//! with a real reconstructed matrix: callers must first match the tagged
//! [`crate::Reconstruction`] outcome, so a failed fit can never be scored.
//!
//! Because the least-squares estimate is unconstrained, it need not be a
//! valid density matrix. Fidelity is clamped into [0, 1] only when the
//! estimate passes the validity check; otherwise the raw value is reported
//! as a diagnostic. Reconstructed purity may likewise leave [0, 1].

use crate::error::{Result, SimError};
use nalgebra::DMatrix;
use num_complex::Complex64;
use qtomo_state::{DensityMatrix, PureState};
use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether an estimate is a valid density
/// matrix for clamping purposes
const VALIDITY_TOL: f64 = 1e-6;

/// Per-trial comparison metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// State fidelity between ground truth and estimate
    pub fidelity: f64,

    /// Trace distance ½‖ρ_true − ρ_est‖₁
    pub trace_distance: f64,

    /// Purity Tr(ρ²) of the ground truth (1 for pure states)
    pub purity_original: f64,

    /// Purity Tr(ρ²) of the estimate (diagnostic; may leave [0,1])
    pub purity_reconstructed: f64,
}

/// Fidelity between a pure ground truth and a (possibly unphysical) estimate
///
/// Uses the pure-state reduction ⟨ψ|ρ_est|ψ⟩ of the quantum state
/// fidelity. The value is clamped into [0, 1] only when the estimate
/// passes the density-matrix validity check; unphysical estimates report
/// the raw value so that the violation stays visible.
///
/// # Errors
/// Returns `SimError::StateError` on dimension mismatch.
pub fn fidelity(original: &PureState, estimate: &DensityMatrix) -> Result<f64> {
    check_dimensions(original, estimate)?;

    let dim = estimate.dimension();
    let psi = original.amplitudes();

    // ⟨ψ|ρ|ψ⟩ = Σᵢⱼ ψᵢ* ρᵢⱼ ψⱼ
    let mut overlap = Complex64::new(0.0, 0.0);
    for i in 0..dim {
        for j in 0..dim {
            overlap += psi[i].conj() * estimate.get(i, j) * psi[j];
        }
    }

    let raw = overlap.re;
    if estimate.is_valid(VALIDITY_TOL) {
        Ok(raw.clamp(0.0, 1.0))
    } else {
        Ok(raw)
    }
}

/// Trace distance ½‖A − B‖₁ between two matrices
///
/// The trace norm is the sum of singular values of the difference, so the
/// result is symmetric in its arguments and lies in [0, 1] for valid
/// density matrices (unbounded if either operand violates positivity).
///
/// # Errors
/// Returns `SimError::StateError` on dimension mismatch.
pub fn trace_distance(a: &DensityMatrix, b: &DensityMatrix) -> Result<f64> {
    if a.dimension() != b.dimension() {
        return Err(SimError::StateError {
            message: format!(
                "dimension mismatch: {} vs {}",
                a.dimension(),
                b.dimension()
            ),
        });
    }

    let dim = a.dimension();
    let diff = DMatrix::from_fn(dim, dim, |i, j| a.get(i, j) - b.get(i, j));
    let singular_values = diff.svd(false, false).singular_values;

    Ok(0.5 * singular_values.iter().sum::<f64>())
}

/// Compute the full metrics record for a scored trial
///
/// # Errors
/// Returns `SimError::StateError` on dimension mismatch.
pub fn analyze(original: &PureState, estimate: &DensityMatrix) -> Result<MetricsRecord> {
    check_dimensions(original, estimate)?;

    let truth = DensityMatrix::from_pure_state(original);

    Ok(MetricsRecord {
        fidelity: fidelity(original, estimate)?,
        trace_distance: trace_distance(&truth, estimate)?,
        purity_original: truth.purity(),
        purity_reconstructed: estimate.purity(),
    })
}

fn check_dimensions(original: &PureState, estimate: &DensityMatrix) -> Result<()> {
    if original.dimension() != estimate.dimension() {
        return Err(SimError::StateError {
            message: format!(
                "state dimension {} does not match estimate dimension {}",
                original.dimension(),
                estimate.dimension()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qtomo_state::{prepare, StateFamily};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_self_fidelity_is_one() {
        let mut rng = StdRng::seed_from_u64(11);
        for family in [StateFamily::Ghz, StateFamily::W, StateFamily::Random] {
            let state = prepare(family, 2, &mut rng).unwrap();
            let rho = DensityMatrix::from_pure_state(&state);
            assert_relative_eq!(fidelity(&state, &rho).unwrap(), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_fidelity_orthogonal_states() {
        let mut rng = StdRng::seed_from_u64(0);
        let ghz = prepare(StateFamily::Ghz, 2, &mut rng).unwrap();
        let w = prepare(StateFamily::W, 2, &mut rng).unwrap();

        // GHZ and W have disjoint support on 2 qubits
        let rho_w = DensityMatrix::from_pure_state(&w);
        assert_relative_eq!(fidelity(&ghz, &rho_w).unwrap(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_trace_distance_self_is_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = prepare(StateFamily::Ghz, 2, &mut rng).unwrap();
        let rho = DensityMatrix::from_pure_state(&state);
        assert_relative_eq!(trace_distance(&rho, &rho).unwrap(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_trace_distance_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(2);
        let a = DensityMatrix::from_pure_state(&prepare(StateFamily::Ghz, 2, &mut rng).unwrap());
        let b = DensityMatrix::from_pure_state(&prepare(StateFamily::W, 2, &mut rng).unwrap());

        let ab = trace_distance(&a, &b).unwrap();
        let ba = trace_distance(&b, &a).unwrap();
        assert_relative_eq!(ab, ba, epsilon = 1e-10);
    }

    #[test]
    fn test_trace_distance_orthogonal_pure_states() {
        // Orthogonal pure states are maximally distinguishable: distance 1
        let mut rng = StdRng::seed_from_u64(3);
        let a = DensityMatrix::from_pure_state(&prepare(StateFamily::Ghz, 2, &mut rng).unwrap());
        let b = DensityMatrix::from_pure_state(&prepare(StateFamily::W, 2, &mut rng).unwrap());

        assert_relative_eq!(trace_distance(&a, &b).unwrap(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_analyze_against_ground_truth() {
        let mut rng = StdRng::seed_from_u64(4);
        let state = prepare(StateFamily::W, 2, &mut rng).unwrap();
        let rho = DensityMatrix::from_pure_state(&state);

        let record = analyze(&state, &rho).unwrap();
        assert_relative_eq!(record.fidelity, 1.0, epsilon = 1e-10);
        assert_relative_eq!(record.trace_distance, 0.0, epsilon = 1e-10);
        assert_relative_eq!(record.purity_original, 1.0, epsilon = 1e-10);
        assert_relative_eq!(record.purity_reconstructed, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_analyze_mixed_estimate() {
        let mut rng = StdRng::seed_from_u64(5);
        let state = prepare(StateFamily::Ghz, 2, &mut rng).unwrap();
        let mixed = DensityMatrix::maximally_mixed(2).unwrap();

        let record = analyze(&state, &mixed).unwrap();
        // ⟨ψ|I/4|ψ⟩ = 1/4
        assert_relative_eq!(record.fidelity, 0.25, epsilon = 1e-10);
        assert_relative_eq!(record.purity_reconstructed, 0.25, epsilon = 1e-10);
        assert!(record.trace_distance > 0.5);
    }

    #[test]
    fn test_unphysical_estimate_reports_raw_fidelity() {
        let mut rng = StdRng::seed_from_u64(6);
        let state = prepare(StateFamily::Ghz, 1, &mut rng).unwrap();

        // Trace 3 is far outside any density matrix; the raw overlap must
        // come back unclamped so the violation stays visible.
        let mut bogus = DensityMatrix::maximally_mixed(1).unwrap();
        bogus.set(0, 0, Complex64::new(3.0, 0.0));
        bogus.set(1, 1, Complex64::new(0.0, 0.0));

        let f = fidelity(&state, &bogus).unwrap();
        assert!(f > 1.0);
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = prepare(StateFamily::Ghz, 2, &mut rng).unwrap();
        let small = DensityMatrix::maximally_mixed(1).unwrap();
        assert!(analyze(&state, &small).is_err());
    }
}
