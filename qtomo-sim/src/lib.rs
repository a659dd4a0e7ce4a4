//! Simulation layer for the qtomo tomography toolkit
//!
//! This crate runs the tomography pipeline: sparse noisy Pauli-basis
//! measurement of a prepared state, least-squares reconstruction of a
//! density-matrix estimate, and comparison metrics against ground truth.
//! A batch harness repeats the pipeline across independently-seeded
//! parallel trials and aggregates the outcomes.
//!
//! # Example
//!
//! ```
//! use qtomo_sim::{run_batch, TomographyConfig};
//!
//! let config = TomographyConfig::noiseless().with_seed(42);
//! let report = run_batch(&config, 4).unwrap();
//!
//! assert_eq!(report.statistics.trials, 4);
//! assert!(report.statistics.mean_fidelity > 0.99);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod measurement;
pub mod reconstruction;
pub mod trial;

pub use analysis::{analyze, fidelity, trace_distance, MetricsRecord};
pub use config::TomographyConfig;
pub use error::{Result, SimError};
pub use measurement::{Measurement, MeasurementSet, MeasurementSimulator};
pub use reconstruction::{
    ConvergenceStatus, OptimizationSummary, Reconstruction, ReconstructorConfig,
    StateReconstructor,
};
pub use trial::{
    derive_trial_seed, run_batch, run_trial, BatchReport, BatchStatistics, TrialOutcome,
};
