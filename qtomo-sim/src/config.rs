//! Trial configuration

use crate::reconstruction::ReconstructorConfig;
use qtomo_state::StateFamily;

/// Configuration for a tomography trial or batch
#[derive(Debug, Clone)]
pub struct TomographyConfig {
    /// Number of qubits
    ///
    /// Determines the Hilbert-space dimension 2^n and the basis size 4^n.
    /// The dense operator basis is only tractable for small registers
    /// (2–4 qubits).
    ///
    /// Default: 2
    pub num_qubits: usize,

    /// Ground-truth state family to prepare each trial
    ///
    /// Default: GHZ
    pub family: StateFamily,

    /// Probability of retaining each basis measurement
    ///
    /// Every basis operator is kept with an independent Bernoulli draw of
    /// this probability, so the retained count is itself random. 0 keeps
    /// nothing (the reconstruction degenerates), 1 is full tomography.
    ///
    /// Default: 0.3
    pub sparsity: f64,

    /// Standard deviation of the Gaussian noise added to each expectation
    ///
    /// Default: 0.01
    pub noise_std: f64,

    /// Optimizer settings for the least-squares reconstruction
    pub reconstructor: ReconstructorConfig,

    /// Random number generator seed for reproducibility
    ///
    /// If None, an entropy seed is drawn per run. Set to Some(seed) for
    /// deterministic trials and batches.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,
}

impl Default for TomographyConfig {
    fn default() -> Self {
        Self {
            num_qubits: 2,
            family: StateFamily::Ghz,
            sparsity: 0.3,
            noise_std: 0.01,
            reconstructor: ReconstructorConfig::default(),
            seed: None,
        }
    }
}

impl TomographyConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a full-tomography, zero-noise configuration
    ///
    /// Every basis operator is measured exactly; reconstruction should
    /// recover the ground truth up to optimizer tolerance.
    pub fn noiseless() -> Self {
        Self {
            sparsity: 1.0,
            noise_std: 0.0,
            ..Default::default()
        }
    }

    /// Create a configuration for debugging
    ///
    /// Deterministic seed, otherwise defaults.
    pub fn debug() -> Self {
        Self {
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Set the number of qubits
    pub fn with_num_qubits(mut self, num_qubits: usize) -> Self {
        self.num_qubits = num_qubits;
        self
    }

    /// Set the ground-truth state family
    pub fn with_family(mut self, family: StateFamily) -> Self {
        self.family = family;
        self
    }

    /// Set the measurement sparsity fraction
    pub fn with_sparsity(mut self, sparsity: f64) -> Self {
        self.sparsity = sparsity;
        self
    }

    /// Set the measurement noise standard deviation
    pub fn with_noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Set the reconstruction optimizer settings
    pub fn with_reconstructor(mut self, reconstructor: ReconstructorConfig) -> Self {
        self.reconstructor = reconstructor;
        self
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.num_qubits < 1 {
            return Err(format!(
                "num_qubits must be at least 1, got {}",
                self.num_qubits
            ));
        }

        if !(0.0..=1.0).contains(&self.sparsity) {
            return Err(format!("sparsity must be in [0,1], got {}", self.sparsity));
        }

        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(format!(
                "noise_std must be finite and >= 0, got {}",
                self.noise_std
            ));
        }

        if self.reconstructor.max_iterations == 0 {
            return Err("reconstructor.max_iterations must be > 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TomographyConfig::default();
        assert_eq!(config.num_qubits, 2);
        assert_eq!(config.family, StateFamily::Ghz);
        assert_eq!(config.sparsity, 0.3);
        assert_eq!(config.noise_std, 0.01);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_noiseless_config() {
        let config = TomographyConfig::noiseless();
        assert_eq!(config.sparsity, 1.0);
        assert_eq!(config.noise_std, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = TomographyConfig::new()
            .with_num_qubits(3)
            .with_family(StateFamily::W)
            .with_sparsity(0.5)
            .with_seed(42);

        assert_eq!(config.num_qubits, 3);
        assert_eq!(config.family, StateFamily::W);
        assert_eq!(config.sparsity, 0.5);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate() {
        let invalid = TomographyConfig {
            sparsity: 1.5,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());

        let invalid = TomographyConfig {
            num_qubits: 0,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());

        let invalid = TomographyConfig {
            noise_std: -0.1,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }
}
