//! Quantum state layer for the qtomo tomography toolkit
//!
//! This crate provides the state side of a tomography trial:
//! - [`PureState`]: dense unit-norm amplitude vectors
//! - [`StateFamily`] / [`prepare`]: GHZ, W, and Haar-random preparation
//! - [`DensityMatrix`]: ρ = |ψ⟩⟨ψ| plus unconstrained estimates
//!
//! # Example
//! ```
//! use qtomo_state::{prepare, DensityMatrix, StateFamily};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let state = prepare(StateFamily::Ghz, 2, &mut rng).unwrap();
//! let rho = DensityMatrix::from_pure_state(&state);
//! assert!((rho.purity() - 1.0).abs() < 1e-10);
//! ```

pub mod density_matrix;
pub mod error;
pub mod prepare;
pub mod pure_state;

// Re-exports for convenience
pub use density_matrix::DensityMatrix;
pub use error::{Result, StateError};
pub use prepare::{prepare, StateFamily};
pub use pure_state::PureState;
