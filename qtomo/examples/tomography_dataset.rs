//! Generate a tomography statistics dataset
//!
//! Runs a batch of sparse noisy tomography trials for each state family
//! and prints the aggregate statistics. Row-level records are available
//! on the report for downstream export.

use qtomo::{run_batch, StateFamily, TomographyConfig};

fn main() {
    let num_trials = 100;

    for family in [StateFamily::Ghz, StateFamily::W, StateFamily::Random] {
        let config = TomographyConfig::new()
            .with_num_qubits(2)
            .with_family(family)
            .with_sparsity(0.3)
            .with_noise_std(0.01)
            .with_seed(1234);

        match run_batch(&config, num_trials) {
            Ok(report) => {
                println!("=== {} states ===", family);
                println!("{}", report.statistics);
            }
            Err(err) => {
                eprintln!("batch for {} states failed: {}", family, err);
            }
        }
    }
}
