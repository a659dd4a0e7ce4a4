//! qtomo: quantum state tomography simulation toolkit
//!
//! Simulates noisy, sparsely-sampled Pauli-basis measurements of an
//! n-qubit pure state, reconstructs a density-matrix estimate by
//! least-squares optimization, and scores the estimate against ground
//! truth with fidelity, trace distance, and purity metrics.
//!
//! The workspace splits into three layers, re-exported here:
//! - `qtomo-core`: Pauli operators and the 4^n measurement basis
//! - `qtomo-state`: GHZ/W/Haar-random preparation and density matrices
//! - `qtomo-sim`: measurement simulation, reconstruction, metrics, and
//!   the parallel batch harness
//!
//! # Example
//!
//! ```
//! use qtomo::{run_batch, StateFamily, TomographyConfig};
//!
//! let config = TomographyConfig::new()
//!     .with_family(StateFamily::W)
//!     .with_sparsity(1.0)
//!     .with_noise_std(0.0)
//!     .with_seed(7);
//!
//! let report = run_batch(&config, 2).unwrap();
//! assert_eq!(report.statistics.scored, 2);
//! ```

pub use qtomo_core::{
    BasisError, BasisOperator, Complex64, OperatorBasis, Pauli, PauliString, PAULIS,
};
pub use qtomo_sim::{
    analyze, fidelity, run_batch, run_trial, trace_distance, BatchReport, BatchStatistics,
    ConvergenceStatus, Measurement, MeasurementSet, MeasurementSimulator, MetricsRecord,
    OptimizationSummary, Reconstruction, ReconstructorConfig, SimError, StateReconstructor,
    TomographyConfig, TrialOutcome,
};
pub use qtomo_state::{prepare, DensityMatrix, PureState, StateError, StateFamily};
