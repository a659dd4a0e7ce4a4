//! Per-trial pipeline and parallel batch harness
//!
//! One trial runs the full pipeline: prepare a ground-truth state, take
//! sparse noisy measurements, reconstruct, and score. Trials touch no
//! shared mutable state beyond the read-only operator basis, so a batch
//! dispatches them across rayon workers.
//!
//! Each trial owns its RNG, seeded with a SplitMix64 mix of the run seed
//! and the trial index. Parallel trials therefore never share a random
//! stream, and a fixed run seed reproduces every trial bit-for-bit
//! regardless of worker scheduling.

use crate::analysis::{analyze, MetricsRecord};
use crate::config::TomographyConfig;
use crate::error::{Result, SimError};
use crate::measurement::MeasurementSimulator;
use crate::reconstruction::{Reconstruction, StateReconstructor};
use qtomo_core::OperatorBasis;
use qtomo_state::prepare;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single tomography trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrialOutcome {
    /// The reconstruction converged and was scored normally
    Scored(MetricsRecord),

    /// The reconstruction was degenerate (no retained measurements); the
    /// metrics compare the ground truth against the uninformative prior
    LowConfidence(MetricsRecord),

    /// The trial could not be scored
    Failed { reason: String },
}

impl TrialOutcome {
    /// The metrics record, if this trial produced one
    pub fn metrics(&self) -> Option<&MetricsRecord> {
        match self {
            TrialOutcome::Scored(record) | TrialOutcome::LowConfidence(record) => Some(record),
            TrialOutcome::Failed { .. } => None,
        }
    }

    /// Whether this trial converged and was scored normally
    pub fn is_scored(&self) -> bool {
        matches!(self, TrialOutcome::Scored(_))
    }
}

/// Derive an independent per-trial seed from the run seed
///
/// SplitMix64 finalizer over the run seed mixed with the trial index, so
/// neighbouring trial indices land on decorrelated seeds.
pub fn derive_trial_seed(run_seed: u64, trial_index: u64) -> u64 {
    let mut z = run_seed ^ trial_index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Run one trial of the pipeline against a shared basis
///
/// Never panics and never propagates an error: every failure mode is
/// folded into [`TrialOutcome::Failed`] so a batch survives bad trials.
pub fn run_trial(config: &TomographyConfig, basis: &OperatorBasis, seed: u64) -> TrialOutcome {
    match execute_trial(config, basis, seed) {
        Ok(outcome) => outcome,
        Err(err) => TrialOutcome::Failed {
            reason: err.to_string(),
        },
    }
}

fn execute_trial(
    config: &TomographyConfig,
    basis: &OperatorBasis,
    seed: u64,
) -> Result<TrialOutcome> {
    let mut rng = StdRng::seed_from_u64(seed);

    let state = prepare(config.family, config.num_qubits, &mut rng)?;
    let simulator = MeasurementSimulator::new(config.sparsity, config.noise_std)?;
    let measurements = simulator.simulate(&state, basis, &mut rng)?;

    let reconstructor = StateReconstructor::new(config.reconstructor.clone());
    match reconstructor.reconstruct(&measurements, basis) {
        Ok(Reconstruction::Converged { estimate, .. }) => {
            Ok(TrialOutcome::Scored(analyze(&state, &estimate)?))
        }
        Ok(Reconstruction::Degenerate { estimate }) => {
            Ok(TrialOutcome::LowConfidence(analyze(&state, &estimate)?))
        }
        Err(err @ SimError::ReconstructionFailed { .. }) => Ok(TrialOutcome::Failed {
            reason: err.to_string(),
        }),
        Err(err) => Err(err),
    }
}

/// Aggregate statistics over a batch of trials
///
/// Means are computed over normally-scored trials only; degenerate and
/// failed trials are counted but excluded from the averages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStatistics {
    /// Total trials run
    pub trials: usize,

    /// Trials scored normally
    pub scored: usize,

    /// Trials flagged low-confidence (degenerate reconstruction)
    pub low_confidence: usize,

    /// Trials that failed outright
    pub failed: usize,

    /// Mean fidelity over scored trials
    pub mean_fidelity: f64,

    /// Mean trace distance over scored trials
    pub mean_trace_distance: f64,

    /// Mean ground-truth purity over scored trials
    pub mean_purity_original: f64,

    /// Mean reconstructed purity over scored trials
    pub mean_purity_reconstructed: f64,
}

impl BatchStatistics {
    /// Aggregate a list of trial outcomes
    pub fn from_outcomes(outcomes: &[TrialOutcome]) -> Self {
        let mut stats = Self {
            trials: outcomes.len(),
            ..Default::default()
        };

        let mut sum_fidelity = 0.0;
        let mut sum_trace_distance = 0.0;
        let mut sum_purity_original = 0.0;
        let mut sum_purity_reconstructed = 0.0;

        for outcome in outcomes {
            match outcome {
                TrialOutcome::Scored(record) => {
                    stats.scored += 1;
                    sum_fidelity += record.fidelity;
                    sum_trace_distance += record.trace_distance;
                    sum_purity_original += record.purity_original;
                    sum_purity_reconstructed += record.purity_reconstructed;
                }
                TrialOutcome::LowConfidence(_) => stats.low_confidence += 1,
                TrialOutcome::Failed { .. } => stats.failed += 1,
            }
        }

        if stats.scored > 0 {
            let n = stats.scored as f64;
            stats.mean_fidelity = sum_fidelity / n;
            stats.mean_trace_distance = sum_trace_distance / n;
            stats.mean_purity_original = sum_purity_original / n;
            stats.mean_purity_reconstructed = sum_purity_reconstructed / n;
        }

        stats
    }
}

impl fmt::Display for BatchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch statistics:")?;
        writeln!(f, "  Trials: {}", self.trials)?;
        writeln!(f, "    Scored: {}", self.scored)?;
        writeln!(f, "    Low confidence: {}", self.low_confidence)?;
        writeln!(f, "    Failed: {}", self.failed)?;

        if self.scored > 0 {
            writeln!(f, "\n  Means over scored trials:")?;
            writeln!(f, "    Fidelity: {:.4}", self.mean_fidelity)?;
            writeln!(f, "    Trace distance: {:.4}", self.mean_trace_distance)?;
            writeln!(f, "    Purity (original): {:.4}", self.mean_purity_original)?;
            writeln!(
                f,
                "    Purity (reconstructed): {:.4}",
                self.mean_purity_reconstructed
            )?;
        }

        Ok(())
    }
}

/// Results of a batch run
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// The run seed actually used (drawn from entropy when unset)
    pub run_seed: u64,

    /// Per-trial outcomes in trial-index order
    pub outcomes: Vec<TrialOutcome>,

    /// Aggregate statistics
    pub statistics: BatchStatistics,
}

/// Run a batch of independent trials in parallel
///
/// The operator basis is built once and shared read-only across rayon
/// workers. With `config.seed` set, the batch is fully deterministic;
/// otherwise one entropy seed is drawn up front so trials still get
/// decorrelated per-trial streams.
///
/// # Errors
/// Returns `SimError::InvalidConfig` for an invalid configuration and
/// `SimError::BasisError` if basis construction fails.
pub fn run_batch(config: &TomographyConfig, num_trials: usize) -> Result<BatchReport> {
    config.validate().map_err(SimError::InvalidConfig)?;

    let basis = OperatorBasis::build(config.num_qubits)?;
    let run_seed = config
        .seed
        .unwrap_or_else(|| StdRng::from_entropy().gen::<u64>());

    let outcomes: Vec<TrialOutcome> = (0..num_trials)
        .into_par_iter()
        .map(|index| run_trial(config, &basis, derive_trial_seed(run_seed, index as u64)))
        .collect();

    let statistics = BatchStatistics::from_outcomes(&outcomes);

    Ok(BatchReport {
        run_seed,
        outcomes,
        statistics,
    })
}
