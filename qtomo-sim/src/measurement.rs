//! Sparse noisy measurement simulation
//!
//! For each operator in the basis the simulator computes the exact
//! expectation Tr(Oρ) against the prepared state, perturbs it with
//! independent zero-mean Gaussian noise, and then decides retention with
//! an independent Bernoulli draw. The retained count is therefore itself
//! random; a sparsity of 0 yields an empty measurement set and a sparsity
//! of 1 yields full tomography.
//!
//! The noise sample is drawn for every operator, retained or not, so the
//! random stream consumed per trial depends only on the basis size. With
//! a fixed seed this makes the full measurement record reproducible
//! regardless of which operators happen to survive retention.

use crate::error::{Result, SimError};
use qtomo_core::OperatorBasis;
use qtomo_state::{DensityMatrix, PureState};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// One retained measurement: operator index plus noisy expectation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Index of the operator in the basis enumeration
    pub operator_index: usize,

    /// Noisy estimate of Tr(Oρ)
    pub expectation: f64,
}

/// The retained measurements of one simulated experiment
#[derive(Debug, Clone)]
pub struct MeasurementSet {
    measurements: Vec<Measurement>,
    total_operators: usize,
}

impl MeasurementSet {
    /// Number of retained measurements
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether nothing was retained
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Total number of operators in the basis
    pub fn total_operators(&self) -> usize {
        self.total_operators
    }

    /// Fraction of the basis actually measured
    pub fn coverage(&self) -> f64 {
        if self.total_operators == 0 {
            0.0
        } else {
            self.measurements.len() as f64 / self.total_operators as f64
        }
    }

    /// Iterate over the retained measurements in operator order
    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter()
    }

    /// The retained measurements as a slice
    pub fn as_slice(&self) -> &[Measurement] {
        &self.measurements
    }
}

/// Simulator for sparse noisy Pauli-basis measurements
#[derive(Debug, Clone)]
pub struct MeasurementSimulator {
    sparsity: f64,
    noise_std: f64,
}

impl MeasurementSimulator {
    /// Create a simulator with the given sparsity fraction and noise level
    ///
    /// # Errors
    /// Returns `SimError::InvalidConfig` for sparsity outside [0,1] or a
    /// negative/non-finite noise standard deviation.
    pub fn new(sparsity: f64, noise_std: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&sparsity) {
            return Err(SimError::InvalidConfig(format!(
                "sparsity must be in [0,1], got {}",
                sparsity
            )));
        }

        if !noise_std.is_finite() || noise_std < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "noise_std must be finite and >= 0, got {}",
                noise_std
            )));
        }

        Ok(Self { sparsity, noise_std })
    }

    /// Simulate one sparse measurement pass of `state` against `basis`
    ///
    /// Consumes the random source for both the noise and the retention
    /// draws.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        state: &PureState,
        basis: &OperatorBasis,
        rng: &mut R,
    ) -> Result<MeasurementSet> {
        if state.dimension() != basis.dimension() {
            return Err(SimError::MeasurementFailed(format!(
                "state dimension {} does not match basis dimension {}",
                state.dimension(),
                basis.dimension()
            )));
        }

        let noise = Normal::new(0.0, self.noise_std)
            .map_err(|e| SimError::InvalidConfig(format!("bad noise distribution: {}", e)))?;

        let rho = DensityMatrix::from_pure_state(state);
        let mut measurements = Vec::new();

        for (index, op) in basis.iter().enumerate() {
            let exact = rho.expectation(&op.matrix)?;
            // Hermitian O against Hermitian ρ: the trace is real
            debug_assert!(
                exact.im.abs() < 1e-9,
                "expectation of {} has imaginary part {}",
                op.string,
                exact.im
            );

            let noisy = exact.re + noise.sample(rng);

            if rng.gen::<f64>() < self.sparsity {
                measurements.push(Measurement {
                    operator_index: index,
                    expectation: noisy,
                });
            }
        }

        Ok(MeasurementSet {
            measurements,
            total_operators: basis.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qtomo_state::{prepare, StateFamily};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ghz_fixture() -> (PureState, OperatorBasis) {
        let mut rng = StdRng::seed_from_u64(0);
        let state = prepare(StateFamily::Ghz, 2, &mut rng).unwrap();
        let basis = OperatorBasis::build(2).unwrap();
        (state, basis)
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(MeasurementSimulator::new(1.5, 0.0).is_err());
        assert!(MeasurementSimulator::new(-0.1, 0.0).is_err());
        assert!(MeasurementSimulator::new(0.5, -1.0).is_err());
        assert!(MeasurementSimulator::new(0.5, f64::NAN).is_err());
    }

    #[test]
    fn test_full_noiseless_tomography() {
        let (state, basis) = ghz_fixture();
        let sim = MeasurementSimulator::new(1.0, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let set = sim.simulate(&state, &basis, &mut rng).unwrap();
        assert_eq!(set.len(), 16);
        assert_relative_eq!(set.coverage(), 1.0, epsilon = 1e-12);

        // II always has expectation 1; ZZ = +1 and XX = +1 for GHZ
        let by_index: Vec<f64> = set.iter().map(|m| m.expectation).collect();
        assert_relative_eq!(by_index[0], 1.0, epsilon = 1e-10); // II
        assert_relative_eq!(by_index[15], 1.0, epsilon = 1e-10); // ZZ
        assert_relative_eq!(by_index[5], 1.0, epsilon = 1e-10); // XX
        assert_relative_eq!(by_index[3], 0.0, epsilon = 1e-10); // IZ
    }

    #[test]
    fn test_zero_sparsity_keeps_nothing() {
        let (state, basis) = ghz_fixture();
        let sim = MeasurementSimulator::new(0.0, 0.01).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let set = sim.simulate(&state, &basis, &mut rng).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.total_operators(), 16);
        assert_relative_eq!(set.coverage(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let (state, basis) = ghz_fixture();
        let sim = MeasurementSimulator::new(0.5, 0.05).unwrap();

        let a = sim
            .simulate(&state, &basis, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = sim
            .simulate(&state, &basis, &mut StdRng::seed_from_u64(9))
            .unwrap();

        assert_eq!(a.len(), b.len());
        for (ma, mb) in a.iter().zip(b.iter()) {
            assert_eq!(ma.operator_index, mb.operator_index);
            assert_eq!(ma.expectation, mb.expectation);
        }
    }

    #[test]
    fn test_noise_perturbs_expectations() {
        let (state, basis) = ghz_fixture();
        let sim = MeasurementSimulator::new(1.0, 0.1).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let set = sim.simulate(&state, &basis, &mut rng).unwrap();
        // The II expectation is exactly 1 without noise; with σ = 0.1 the
        // sampled value differs from 1 almost surely.
        let ii = set.iter().find(|m| m.operator_index == 0).unwrap();
        assert!((ii.expectation - 1.0).abs() > 1e-6);
        assert!((ii.expectation - 1.0).abs() < 1.0);
    }
}
